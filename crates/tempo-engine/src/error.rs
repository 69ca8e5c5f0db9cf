//! Engine errors.

/// Errors surfaced by [`Engine::think`](crate::Engine::think).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SearchError {
    /// The root position has no legal moves — the game is already over
    /// (checkmate or stalemate) and should have been resolved by the
    /// caller before asking for a move.
    #[error("no legal moves in the root position")]
    NoLegalMoves,
}
