//! Move ordering — hash move, MVV-LVA captures, killer, history.
//!
//! Ordering is pure: every legal move is yielded exactly once, best first.
//! Pruning decisions belong to the search, not here.

use tempo_core::{Color, Move, MoveList, PieceKind};

use crate::eval::tables::PIECE_VALUES;
use crate::search::heuristics::{HistoryTable, KillerTable};

/// Score band for the position's hash move.
const HASH_MOVE_SCORE: i32 = 1_000_000;

/// Base of the capture band. With victim values scaled by
/// [`MVV_FACTOR`], the weakest capture (queen takes pawn) scores 99_795 —
/// still above every non-capture.
const CAPTURE_BASE: i32 = 100_000;

/// Victim-value multiplier for MVV-LVA.
const MVV_FACTOR: i32 = 10;

/// Score band for the current ply's killer move.
const KILLER_SCORE: i32 = 90_000;

/// Middlegame material value used for capture ordering.
#[inline]
fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.index()]
}

/// Assign an ordering score to one move.
fn score_move(
    mv: Move,
    side: Color,
    hash_move: Move,
    killers: &KillerTable,
    history: &HistoryTable,
    ply: i32,
) -> i32 {
    if mv == hash_move {
        return HASH_MOVE_SCORE;
    }
    if let Some(victim) = mv.captured() {
        // Most valuable victim first, least valuable attacker as tiebreak.
        return CAPTURE_BASE + MVV_FACTOR * piece_value(victim) - piece_value(mv.piece());
    }
    if killers.is_killer(ply, mv) {
        return KILLER_SCORE;
    }
    history.score(side, mv.piece(), mv.dest())
}

/// Incremental move picker using selection sort.
///
/// Scores are assigned once at construction; `pick_next` repeatedly yields the
/// remaining maximum. Ties resolve to the earlier generated move, so the
/// order is deterministic for a given input.
pub struct MovePicker {
    moves: [Move; 256],
    scores: [i32; 256],
    len: usize,
    cursor: usize,
}

impl MovePicker {
    /// Score `moves` for the node described by the remaining arguments.
    pub fn new(
        moves: &MoveList,
        side: Color,
        hash_move: Move,
        killers: &KillerTable,
        history: &HistoryTable,
        ply: i32,
    ) -> MovePicker {
        let mut picker = MovePicker {
            moves: [Move::NULL; 256],
            scores: [0; 256],
            len: moves.len(),
            cursor: 0,
        };
        for (i, &mv) in moves.iter().enumerate() {
            picker.moves[i] = mv;
            picker.scores[i] = score_move(mv, side, hash_move, killers, history, ply);
        }
        picker
    }

    /// Yield the next highest-scored move, or `None` when exhausted.
    pub fn pick_next(&mut self) -> Option<Move> {
        if self.cursor >= self.len {
            return None;
        }

        let mut best = self.cursor;
        for i in (self.cursor + 1)..self.len {
            if self.scores[i] > self.scores[best] {
                best = i;
            }
        }

        self.moves.swap(self.cursor, best);
        self.scores.swap(self.cursor, best);

        let mv = self.moves[self.cursor];
        self.cursor += 1;
        Some(mv)
    }
}
