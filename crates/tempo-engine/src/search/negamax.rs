//! Principal-variation search with quiescence, selective pruning, and a
//! transposition table.
//!
//! One recursive function serves both the main search and quiescence:
//! at depth <= 0 the node switches to stand-pat scoring and explores only
//! captures (or, while in check, all evasions). Every decision point runs
//! in a fixed order — repetition, check extension, stand-pat, TT probe,
//! static pruning, move loop, TT store — so the interacting heuristics
//! stay predictable.

use tempo_core::{Clock, Move, MoveGuard, PieceKind, Position, SkipGuard};

use crate::eval::evaluate;
use crate::params::SearchParams;
use crate::search::control::SearchControl;
use crate::search::heuristics::{HistoryTable, KillerTable};
use crate::search::ordering::MovePicker;
use crate::search::tt::{Bound, TranspositionTable};

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 30_000;

/// Base score for checkmate; a mate found at ply `p` scores
/// `MATE_SCORE - p`, so shallower mates rank higher.
pub const MATE_SCORE: i32 = 29_000;

/// Scores above this threshold indicate a forced mate.
pub const MATE_THRESHOLD: i32 = 28_000;

/// Sentinel returned by every frame once the time budget is exhausted.
/// Strictly outside `[-INF, INF]`, so it can never be mistaken for a
/// genuine evaluation; callers check the abort latch rather than the
/// value, and the driver discards the whole iteration.
pub const ABORTED: i32 = 31_000;

/// Maximum search depth in plies, for array sizing and recursion limits.
pub const MAX_PLY: usize = 128;

/// Search state threaded through the recursion.
pub(super) struct SearchContext<'a, C: Clock> {
    /// Total nodes visited.
    pub nodes: u64,
    /// Transposition table (persists across searches).
    pub tt: &'a mut TranspositionTable,
    /// Killer slots, reset per root search.
    pub killers: KillerTable,
    /// History table, reset per root search.
    pub history: HistoryTable,
    /// Time budget and abort latch.
    pub control: SearchControl<'a, C>,
    /// Tunables.
    pub params: &'a SearchParams,
    /// Best root move seen by the current iteration. Only adopted by the
    /// driver when the iteration finishes inside its window.
    pub root_move: Move,
}

/// Whether the side to move owns any non-pawn piece. Null-move pruning is
/// unsound in positions where every legal move worsens the mover's game
/// (zugzwang), which in practice concentrates in pawn-and-king endings.
fn has_non_pawn_material<P: Position>(pos: &P) -> bool {
    let side = pos.side_to_move();
    [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ]
    .into_iter()
    .any(|kind| !pos.piece_bitboard(side, kind).is_empty())
}

/// Negamax with alpha-beta, PVS re-search, and quiescence.
///
/// Returns the score of `pos` from the side to move's perspective, bounded
/// by the caller's `(alpha, beta)` window, or [`ABORTED`] once the abort
/// latch trips. Requires `alpha < beta`.
pub(super) fn negamax<P: Position, C: Clock>(
    pos: &mut P,
    mut depth: i32,
    ply: i32,
    mut alpha: i32,
    mut beta: i32,
    allow_null: bool,
    ctx: &mut SearchContext<'_, C>,
) -> i32 {
    debug_assert!(alpha < beta);

    ctx.nodes += 1;
    if ctx.control.should_stop(ctx.nodes) {
        return ABORTED;
    }

    let root = ply == 0;

    // Repeated positions and rule draws score zero; the root is exempt so
    // a move always gets picked.
    if !root && (pos.is_repetition() || pos.is_draw()) {
        return 0;
    }

    if ply as usize >= MAX_PLY {
        return evaluate(pos);
    }

    let in_check = pos.in_check();

    // Check extension: forced sequences get one extra ply so the horizon
    // does not cut through them.
    if in_check {
        depth += 1;
    }

    let in_qsearch = depth <= 0;
    let is_pv = beta - alpha > 1;
    let original_alpha = alpha;

    let mut best_score = -INF;

    // Stand-pat: in quiescence the mover may decline every capture, so the
    // static eval is an immediate lower bound.
    if in_qsearch {
        best_score = evaluate(pos);
        if best_score >= beta {
            return best_score;
        }
        if best_score > alpha {
            alpha = best_score;
        }
    }

    // Transposition table probe. A deep-enough entry can tighten the
    // window or answer the node outright; anything else is only an
    // ordering hint.
    let mut hash_move = Move::NULL;
    if let Some(entry) = ctx.tt.probe(pos.hash(), ply) {
        hash_move = entry.best_move;
        if !root && entry.depth as i32 >= depth {
            match entry.bound {
                Bound::Exact => return entry.score,
                Bound::LowerBound => alpha = alpha.max(entry.score),
                Bound::UpperBound => beta = beta.min(entry.score),
                Bound::None => {}
            }
            if alpha >= beta {
                return entry.score;
            }
        }
    }

    // Static pruning — never at PV nodes, never in check, never in
    // quiescence.
    let mut can_futility_prune = false;
    if !in_qsearch && !is_pv && !in_check {
        let static_eval = evaluate(pos);

        // Reverse futility: so far above beta that no quiet reply is
        // expected to claw it back.
        let rfp_margin = ctx.params.rfp_margin * depth;
        if static_eval - rfp_margin >= beta {
            return static_eval - rfp_margin;
        }

        // Null move: hand the opponent a free tempo; if a reduced search
        // still fails high, the position is good enough to cut.
        if allow_null
            && depth >= ctx.params.nmp_min_depth
            && (!ctx.params.nmp_material_guard || has_non_pawn_material(pos))
        {
            if let Some(mut skipped) = SkipGuard::try_new(pos) {
                let reduction = ctx.params.nmp_base_reduction + depth / ctx.params.nmp_depth_divisor;
                let score = -negamax(
                    &mut *skipped,
                    depth - reduction,
                    ply + 1,
                    -beta,
                    -beta + 1,
                    false,
                    ctx,
                );
                drop(skipped);
                if ctx.control.aborted() {
                    return ABORTED;
                }
                if score >= beta {
                    return score;
                }
            }
        }

        // Futility: flag quiet moves for skipping when even a generous
        // margin cannot lift the static eval to alpha.
        can_futility_prune = static_eval + ctx.params.futility_margin * depth <= alpha;
    }

    let moves = pos.legal_moves(in_qsearch && !in_check);

    if moves.is_empty() {
        if !in_qsearch || in_check {
            // No legal moves at all: checkmate or stalemate.
            return if in_check { -(MATE_SCORE - ply) } else { 0 };
        }
        // Quiet quiescence node with no captures left: stand pat.
        return best_score;
    }

    let side = pos.side_to_move();
    let mut picker = MovePicker::new(&moves, side, hash_move, &ctx.killers, &ctx.history, ply);

    let mut best_move = Move::NULL;
    let mut moves_tried = 0usize;
    let mut quiets_tried = 0usize;
    let lmp_threshold = ctx.params.lmp_base + (depth * depth).max(0) as usize;

    while let Some(mv) = picker.pick_next() {
        // The clock is re-checked before committing to each move so a
        // blown budget cannot start another subtree.
        if ctx.control.should_stop(ctx.nodes) {
            return ABORTED;
        }

        let tactical = mv.is_tactical();

        if !in_qsearch && !is_pv && !in_check && !tactical && moves_tried > 0 {
            if can_futility_prune {
                continue;
            }
            // Late-move pruning: at shallow depth, quiet moves this far
            // down the ordering almost never become best.
            if depth <= ctx.params.lmp_max_depth && quiets_tried >= lmp_threshold {
                continue;
            }
        }

        let score;
        {
            let mut child = MoveGuard::new(pos, mv);
            let gives_check = child.in_check();

            if moves_tried == 0 || in_qsearch {
                // First move (and every quiescence move): full window.
                score = -negamax(&mut *child, depth - 1, ply + 1, -beta, -alpha, allow_null, ctx);
            } else {
                // Late quiet moves get a reduced null-window probe first;
                // anything surprising is re-verified at full depth, then —
                // if it still beats alpha — at the full window.
                let reduce = !is_pv
                    && !tactical
                    && !in_check
                    && !gives_check
                    && depth >= ctx.params.lmr_min_depth
                    && moves_tried >= ctx.params.lmr_move_threshold;

                let mut probe = if reduce {
                    -negamax(
                        &mut *child,
                        depth - ctx.params.lmr_reduction,
                        ply + 1,
                        -alpha - 1,
                        -alpha,
                        allow_null,
                        ctx,
                    )
                } else {
                    alpha + 1
                };

                if probe > alpha && !ctx.control.aborted() {
                    probe = -negamax(&mut *child, depth - 1, ply + 1, -alpha - 1, -alpha, allow_null, ctx);
                    if probe > alpha && probe < beta && !ctx.control.aborted() {
                        probe = -negamax(&mut *child, depth - 1, ply + 1, -beta, -alpha, allow_null, ctx);
                    }
                }
                score = probe;
            }
        }

        if ctx.control.aborted() {
            return ABORTED;
        }

        moves_tried += 1;
        if !tactical {
            quiets_tried += 1;
        }

        if score > best_score {
            best_score = score;
            best_move = mv;
            if root {
                ctx.root_move = mv;
            }
            if score > alpha {
                alpha = score;
                if alpha >= beta {
                    // A quiet cutoff move is worth remembering.
                    if !mv.is_capture() {
                        ctx.history.reward(side, mv.piece(), mv.dest(), depth);
                        ctx.killers.store(ply, mv);
                    }
                    break;
                }
            }
        }
    }

    let bound = if best_score >= beta {
        Bound::LowerBound
    } else if best_score <= original_alpha {
        Bound::UpperBound
    } else {
        Bound::Exact
    };
    ctx.tt
        .store(pos.hash(), depth.max(0) as u8, best_score, best_move, bound, ply);

    best_score
}
