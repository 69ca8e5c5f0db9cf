//! Move representation, bit-packed into a u32.
//!
//! Unlike a board-owned move encoding, a `Move` here carries everything the
//! engine needs to order and prune it — the moved piece, the captured piece,
//! and the promotion target — so no board query is required once the move
//! list has been generated.

use std::fmt;

use crate::piece_kind::PieceKind;
use crate::square::Square;

// Private bit-field constants.
const SRC_MASK: u32 = 0x0000_003F;
const DST_MASK: u32 = 0x0000_0FC0;
const PIECE_MASK: u32 = 0x0000_7000;
const CAPTURE_MASK: u32 = 0x0003_8000;
const PROMO_MASK: u32 = 0x001C_0000;
const DST_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const CAPTURE_SHIFT: u32 = 15;
const PROMO_SHIFT: u32 = 18;

/// A move encoded in 32 bits.
///
/// ```text
/// bits  0-5:  source square        (0-63)
/// bits  6-11: destination square   (0-63)
/// bits 12-14: moved piece kind     (0-5)
/// bits 15-17: captured piece + 1   (0 = not a capture)
/// bits 18-20: promotion piece + 1  (0 = not a promotion)
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    /// Null move sentinel (a pawn "move" A1→A1). Never a legal move.
    pub const NULL: Move = Move(0);

    /// Create a quiet (non-capturing) move.
    #[inline]
    pub const fn quiet(source: Square, dest: Square, piece: PieceKind) -> Move {
        Move(
            source.index() as u32
                | ((dest.index() as u32) << DST_SHIFT)
                | ((piece.index() as u32) << PIECE_SHIFT),
        )
    }

    /// Create a capture.
    #[inline]
    pub const fn capture(source: Square, dest: Square, piece: PieceKind, victim: PieceKind) -> Move {
        Move(Move::quiet(source, dest, piece).0 | ((victim.index() as u32 + 1) << CAPTURE_SHIFT))
    }

    /// Create a (pawn) promotion to `promo`, optionally capturing `victim`.
    #[inline]
    pub const fn promotion(
        source: Square,
        dest: Square,
        promo: PieceKind,
        victim: Option<PieceKind>,
    ) -> Move {
        let base = match victim {
            Some(v) => Move::capture(source, dest, PieceKind::Pawn, v),
            None => Move::quiet(source, dest, PieceKind::Pawn),
        };
        Move(base.0 | ((promo.index() as u32 + 1) << PROMO_SHIFT))
    }

    /// Extract the source square.
    #[inline]
    pub const fn source(self) -> Square {
        match Square::from_index((self.0 & SRC_MASK) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Extract the destination square.
    #[inline]
    pub const fn dest(self) -> Square {
        match Square::from_index(((self.0 & DST_MASK) >> DST_SHIFT) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// The kind of the moved piece.
    #[inline]
    pub fn piece(self) -> PieceKind {
        // Constructors only write indices 0..=5 into the field.
        PieceKind::from_index(((self.0 & PIECE_MASK) >> PIECE_SHIFT) as u8)
            .unwrap_or(PieceKind::Pawn)
    }

    /// The captured piece, or `None` for a quiet move.
    #[inline]
    pub fn captured(self) -> Option<PieceKind> {
        match (self.0 & CAPTURE_MASK) >> CAPTURE_SHIFT {
            0 => None,
            n => PieceKind::from_index(n as u8 - 1),
        }
    }

    /// The promotion target, or `None` if this is not a promotion.
    #[inline]
    pub fn promotion_to(self) -> Option<PieceKind> {
        match (self.0 & PROMO_MASK) >> PROMO_SHIFT {
            0 => None,
            n => PieceKind::from_index(n as u8 - 1),
        }
    }

    /// Whether this move captures a piece.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.0 & CAPTURE_MASK != 0
    }

    /// Whether this move is a promotion.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.0 & PROMO_MASK != 0
    }

    /// Whether this move is tactical (a capture or a promotion).
    ///
    /// Tactical moves are exempt from futility and late-move pruning.
    #[inline]
    pub const fn is_tactical(self) -> bool {
        self.0 & (CAPTURE_MASK | PROMO_MASK) != 0
    }

    /// Whether this is the null move sentinel.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == Move::NULL.0
    }

    /// Format as a UCI-style move string ("e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion_to() {
            Some(promo) => format!("{}{}{}", self.source(), self.dest(), promo.letter()),
            None => format!("{}{}", self.source(), self.dest()),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Move(NULL)")
        } else {
            write!(f, "Move({self})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    #[test]
    fn quiet_move_fields() {
        let mv = Move::quiet(Square::G1, Square::F3, PieceKind::Knight);
        assert_eq!(mv.source(), Square::G1);
        assert_eq!(mv.dest(), Square::F3);
        assert_eq!(mv.piece(), PieceKind::Knight);
        assert_eq!(mv.captured(), None);
        assert!(!mv.is_capture());
        assert!(!mv.is_tactical());
    }

    #[test]
    fn capture_fields() {
        let mv = Move::capture(Square::E4, Square::D5, PieceKind::Pawn, PieceKind::Queen);
        assert_eq!(mv.captured(), Some(PieceKind::Queen));
        assert!(mv.is_capture());
        assert!(mv.is_tactical());
        assert!(!mv.is_promotion());
    }

    #[test]
    fn promotion_fields() {
        let quiet = Move::promotion(Square::E7, Square::E8, PieceKind::Queen, None);
        assert_eq!(quiet.piece(), PieceKind::Pawn);
        assert_eq!(quiet.promotion_to(), Some(PieceKind::Queen));
        assert!(quiet.is_promotion());
        assert!(!quiet.is_capture());

        let taking = Move::promotion(Square::E7, Square::D8, PieceKind::Knight, Some(PieceKind::Rook));
        assert_eq!(taking.captured(), Some(PieceKind::Rook));
        assert!(taking.is_capture());
        assert!(taking.is_tactical());
    }

    #[test]
    fn null_sentinel() {
        assert!(Move::NULL.is_null());
        assert!(!Move::quiet(Square::E2, Square::E4, PieceKind::Pawn).is_null());
    }

    #[test]
    fn uci_formatting() {
        assert_eq!(
            Move::quiet(Square::E2, Square::E4, PieceKind::Pawn).to_uci(),
            "e2e4"
        );
        assert_eq!(
            Move::promotion(Square::A7, Square::A8, PieceKind::Queen, None).to_uci(),
            "a7a8q"
        );
    }

    #[test]
    fn structural_equality() {
        let a = Move::quiet(Square::E2, Square::E4, PieceKind::Pawn);
        let b = Move::quiet(Square::E2, Square::E4, PieceKind::Pawn);
        let c = Move::quiet(Square::E2, Square::E3, PieceKind::Pawn);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
