//! Iterative deepening with aspiration windows.

pub mod control;
pub mod heuristics;
pub mod negamax;
pub mod ordering;
pub mod tt;

use tracing::debug;

use tempo_core::{Clock, Move, Position};

use crate::error::SearchError;
use crate::params::SearchParams;
use control::SearchControl;
use heuristics::{HistoryTable, KillerTable};
use negamax::{INF, MATE_SCORE, SearchContext, negamax};
use tt::TranspositionTable;

/// Result of a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    /// Best move found at the highest completed depth.
    pub best_move: Move,
    /// Score of `best_move` in centipawns, from the mover's perspective.
    pub score: i32,
    /// Highest fully completed iteration depth (0 if none completed).
    pub depth: i32,
    /// Total nodes visited.
    pub nodes: u64,
}

/// Default transposition table size in megabytes.
const DEFAULT_TT_MB: usize = 16;

/// A search engine instance.
///
/// Owns the state that outlives a single move decision: the transposition
/// table deliberately persists from one [`think`](Engine::think) to the
/// next (results are path-dependent by design), while killers and history
/// are reset at the start of every call.
pub struct Engine {
    tt: TranspositionTable,
    params: SearchParams,
}

impl Engine {
    /// Create an engine with default tunables and a 16 MB table.
    pub fn new() -> Engine {
        Engine::with_params(SearchParams::default())
    }

    /// Create an engine with the given tunables.
    pub fn with_params(params: SearchParams) -> Engine {
        Engine {
            tt: TranspositionTable::new(DEFAULT_TT_MB),
            params,
        }
    }

    /// Replace the transposition table with one of `mb` megabytes.
    pub fn resize_tt(&mut self, mb: usize) {
        self.tt = TranspositionTable::new(mb);
    }

    /// Forget all cached search results.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// The engine's tunables.
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Pick a move for the side to move in `pos` within the clock's budget.
    pub fn think<P: Position, C: Clock>(
        &mut self,
        pos: &mut P,
        clock: &C,
    ) -> Result<Move, SearchError> {
        self.search(pos, clock).map(|report| report.best_move)
    }

    /// Like [`think`](Engine::think), but returns score, depth, and node
    /// statistics along with the move.
    pub fn search<P: Position, C: Clock>(
        &mut self,
        pos: &mut P,
        clock: &C,
    ) -> Result<SearchReport, SearchError> {
        let root_moves = pos.legal_moves(false);
        if root_moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        // Until an iteration completes, fall back on the first legal move.
        let fallback = root_moves[0];

        let mut ctx = SearchContext {
            nodes: 0,
            tt: &mut self.tt,
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            control: SearchControl::new(
                clock,
                self.params.soft_time_fraction,
                self.params.hard_time_factor,
            ),
            params: &self.params,
            root_move: fallback,
        };

        let mut report = SearchReport {
            best_move: fallback,
            score: 0,
            depth: 0,
            nodes: 0,
        };

        let mut alpha = -INF;
        let mut beta = INF;
        let mut depth = 1;

        while depth <= self.params.max_depth {
            let score = negamax(pos, depth, 0, alpha, beta, true, &mut ctx);

            // An aborted iteration is incomplete: its root move is
            // ambiguous and must not replace the previous answer.
            if ctx.control.aborted() {
                break;
            }

            if score <= alpha {
                // Fail low: widen the bottom of the window, same depth.
                alpha -= self.params.aspiration_widening;
                continue;
            }
            if score >= beta {
                // Fail high: widen the top of the window, same depth.
                beta += self.params.aspiration_widening;
                continue;
            }

            // Landed inside the window — adopt this iteration's answer.
            report = SearchReport {
                best_move: ctx.root_move,
                score,
                depth,
                nodes: ctx.nodes,
            };
            debug!(
                depth,
                score,
                nodes = ctx.nodes,
                elapsed_ms = clock.elapsed_millis(),
                best = %report.best_move,
                "completed iteration"
            );

            // A forced mate this close cannot be improved by deepening.
            if score.abs() >= MATE_SCORE - self.params.mate_distance_stop {
                break;
            }
            if ctx.control.should_stop_iterating() {
                break;
            }

            alpha = score - self.params.aspiration_delta;
            beta = score + self.params.aspiration_delta;
            depth += 1;
        }

        report.nodes = ctx.nodes;
        Ok(report)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("tt", &self.tt)
            .field("params", &self.params)
            .finish()
    }
}
