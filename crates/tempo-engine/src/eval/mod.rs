//! Tapered positional evaluation.
//!
//! Scores a position from the side to move's perspective by combining
//! material and piece-square values for both game phases and blending
//! them by the amount of non-pawn material left on the board.

pub mod tables;

use tempo_core::{Color, PieceKind, Position};

use tables::{MAX_PHASE, PHASE_WEIGHTS, tables};

/// Static evaluation of `pos` in centipawns, from the perspective of the
/// side to move. Deterministic and side-effect-free.
pub fn evaluate<P: Position>(pos: &P) -> i32 {
    let t = tables();

    let mut mg = [0i32; 2];
    let mut eg = [0i32; 2];
    let mut phase = 0i32;

    for color in Color::ALL {
        for kind in PieceKind::ALL {
            for square in pos.piece_bitboard(color, kind) {
                // Tables are canonical for Black; White mirrors vertically.
                let sq = match color {
                    Color::White => square.flip_rank().index(),
                    Color::Black => square.index(),
                };
                phase += PHASE_WEIGHTS[kind.index()];
                mg[color.index()] += t.mg[sq][kind.index()];
                eg[color.index()] += t.eg[sq][kind.index()];
            }
        }
    }

    // Promotions can push the raw phase past a full material complement.
    let phase = phase.min(MAX_PHASE);

    let mg_balance = mg[Color::White.index()] - mg[Color::Black.index()];
    let eg_balance = eg[Color::White.index()] - eg[Color::Black.index()];
    let tapered = (mg_balance * phase + eg_balance * (MAX_PHASE - phase)) / MAX_PHASE;

    let signed = match pos.side_to_move() {
        Color::White => tapered,
        Color::Black => -tapered,
    };

    // Small tempo bonus for the mover; keeps successive iteration scores
    // close enough for narrow aspiration windows.
    signed + phase / 2
}
