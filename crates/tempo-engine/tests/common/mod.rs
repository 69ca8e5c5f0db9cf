//! Test doubles for the engine's external collaborators: a scripted
//! game-tree `Position` and fixed clocks.
//!
//! A `TreePosition` is a graph of hand-built nodes. Moves are edges; making
//! a move pushes the target node onto a path stack and unmaking pops it, so
//! LIFO violations show up as test failures immediately.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use tempo_core::{Bitboard, Clock, Color, Move, MoveList, PieceKind, Position, Square};

/// One scripted position in the tree.
pub struct MockNode {
    pub hash: u64,
    pub stm: Color,
    pub in_check: bool,
    pub repetition: bool,
    pub draw: bool,
    pub boards: [[u64; PieceKind::COUNT]; Color::COUNT],
    pub edges: Vec<(Move, usize)>,
    pub skip_to: Option<usize>,
}

impl MockNode {
    pub fn new(hash: u64, stm: Color) -> MockNode {
        MockNode {
            hash,
            stm,
            in_check: false,
            repetition: false,
            draw: false,
            boards: [[0; PieceKind::COUNT]; Color::COUNT],
            edges: Vec::new(),
            skip_to: None,
        }
    }

    pub fn in_check(mut self) -> MockNode {
        self.in_check = true;
        self
    }

    pub fn repetition(mut self) -> MockNode {
        self.repetition = true;
        self
    }

    pub fn draw(mut self) -> MockNode {
        self.draw = true;
        self
    }

    /// Place pieces for `color` on the given squares.
    pub fn with_pieces(mut self, color: Color, pieces: &[(PieceKind, Square)]) -> MockNode {
        for &(kind, sq) in pieces {
            self.boards[color.index()][kind.index()] |= 1u64 << sq.index();
        }
        self
    }

    /// Add a move edge to the node at `target`.
    pub fn with_edge(mut self, mv: Move, target: usize) -> MockNode {
        self.edges.push((mv, target));
        self
    }
}

/// A `Position` backed by a vector of scripted nodes. Node 0 is the root.
pub struct TreePosition {
    nodes: Vec<MockNode>,
    path: Vec<usize>,
}

impl TreePosition {
    pub fn new(nodes: Vec<MockNode>) -> TreePosition {
        assert!(!nodes.is_empty(), "tree needs a root node");
        TreePosition {
            nodes,
            path: vec![0],
        }
    }

    fn current(&self) -> &MockNode {
        &self.nodes[*self.path.last().expect("path never empties")]
    }

    /// Whether every make has been matched by an unmake.
    pub fn is_at_root(&self) -> bool {
        self.path.len() == 1
    }
}

impl Position for TreePosition {
    fn legal_moves(&self, captures_only: bool) -> MoveList {
        self.current()
            .edges
            .iter()
            .map(|&(mv, _)| mv)
            .filter(|mv| !captures_only || mv.is_capture())
            .collect()
    }

    fn make_move(&mut self, mv: Move) {
        let target = self
            .current()
            .edges
            .iter()
            .find(|&&(edge, _)| edge == mv)
            .unwrap_or_else(|| panic!("move {mv} is not legal in node {}", self.path.last().unwrap()))
            .1;
        self.path.push(target);
    }

    fn unmake_move(&mut self, _mv: Move) {
        assert!(self.path.len() > 1, "unmake below the root");
        self.path.pop();
    }

    fn hash(&self) -> u64 {
        self.current().hash
    }

    fn side_to_move(&self) -> Color {
        self.current().stm
    }

    fn in_check(&self) -> bool {
        self.current().in_check
    }

    fn is_repetition(&self) -> bool {
        self.current().repetition
    }

    fn is_draw(&self) -> bool {
        self.current().draw
    }

    fn piece_bitboard(&self, color: Color, kind: PieceKind) -> Bitboard {
        Bitboard::new(self.current().boards[color.index()][kind.index()])
    }

    fn try_skip_turn(&mut self) -> bool {
        match self.current().skip_to {
            Some(target) => {
                self.path.push(target);
                true
            }
            None => false,
        }
    }

    fn undo_skip_turn(&mut self) {
        assert!(self.path.len() > 1, "undo_skip_turn below the root");
        self.path.pop();
    }
}

/// Mirror a move vertically (for color-flipped trees).
pub fn mirror_move(mv: Move) -> Move {
    let src = mv.source().flip_rank();
    let dst = mv.dest().flip_rank();
    match (mv.captured(), mv.promotion_to()) {
        (None, None) => Move::quiet(src, dst, mv.piece()),
        (Some(victim), None) => Move::capture(src, dst, mv.piece(), victim),
        (victim, Some(promo)) => Move::promotion(src, dst, promo, victim),
    }
}

/// Build the color-flipped equivalent of a tree: colors swapped, every
/// square mirrored vertically, hashes relocated. The game is identical
/// from the other side's point of view.
pub fn mirror_tree(nodes: &[MockNode]) -> Vec<MockNode> {
    nodes
        .iter()
        .map(|n| {
            let mut boards = [[0u64; PieceKind::COUNT]; Color::COUNT];
            for color in Color::ALL {
                for kind in PieceKind::ALL {
                    // A vertical flip of a LERF bitboard is a byte swap.
                    boards[color.flip().index()][kind.index()] =
                        n.boards[color.index()][kind.index()].swap_bytes();
                }
            }
            MockNode {
                hash: n.hash ^ 0x9E37_79B9_7F4A_7C15,
                stm: n.stm.flip(),
                in_check: n.in_check,
                repetition: n.repetition,
                draw: n.draw,
                boards,
                edges: n.edges.iter().map(|&(mv, t)| (mirror_move(mv), t)).collect(),
                skip_to: n.skip_to,
            }
        })
        .collect()
}

/// A clock frozen at fixed readings.
pub struct FrozenClock {
    pub elapsed: u64,
    pub remaining: u64,
}

impl Clock for FrozenClock {
    fn elapsed_millis(&self) -> u64 {
        self.elapsed
    }

    fn remaining_millis(&self) -> u64 {
        self.remaining
    }
}

/// A clock with plenty of time: searches run to their depth limit.
pub fn generous_clock() -> FrozenClock {
    FrozenClock {
        elapsed: 0,
        remaining: 3_600_000,
    }
}

/// A clock that expired before the search began.
pub fn expired_clock() -> FrozenClock {
    FrozenClock {
        elapsed: 1_000_000,
        remaining: 30_000,
    }
}
