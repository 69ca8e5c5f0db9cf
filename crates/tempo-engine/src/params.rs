//! Named search tunables.
//!
//! Every margin, threshold, and window the search consults lives here, so a
//! differently-tuned engine is a `SearchParams` literal rather than a fork
//! of the algorithm. Defaults are the values the engine was tuned with.

/// Tunable parameters for one [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Reverse-futility margin per remaining depth, in centipawns. A node
    /// whose static eval beats beta by `depth * rfp_margin` returns early.
    pub rfp_margin: i32,

    /// Minimum remaining depth for null-move pruning.
    pub nmp_min_depth: i32,

    /// Base depth reduction for the null-move search.
    pub nmp_base_reduction: i32,

    /// Extra null-move reduction: `depth / nmp_depth_divisor`.
    pub nmp_depth_divisor: i32,

    /// Require the side to move to own non-pawn material before trying a
    /// null move. Guards against zugzwang in pawn endgames.
    pub nmp_material_guard: bool,

    /// Futility margin per remaining depth, in centipawns. When the static
    /// eval plus this margin cannot reach alpha, quiet moves are skipped.
    pub futility_margin: i32,

    /// Maximum remaining depth at which late-move pruning applies.
    pub lmp_max_depth: i32,

    /// Quiet moves tried before late-move pruning kicks in, on top of a
    /// `depth * depth` allowance.
    pub lmp_base: usize,

    /// Minimum remaining depth for late-move reductions.
    pub lmr_min_depth: i32,

    /// Move-ordering index from which quiet moves are reduction candidates.
    pub lmr_move_threshold: usize,

    /// Depth reduction applied to late quiet moves.
    pub lmr_reduction: i32,

    /// Half-width of the aspiration window opened around the previous
    /// iteration's score.
    pub aspiration_delta: i32,

    /// Amount the failed side of the window is widened before a same-depth
    /// re-search.
    pub aspiration_widening: i32,

    /// Stop deepening once a forced mate within this many plies is proven.
    pub mate_distance_stop: i32,

    /// Soft budget divisor: thinking aims for `remaining / soft_time_fraction`
    /// milliseconds per move, checked between iterations.
    pub soft_time_fraction: u64,

    /// Hard budget multiplier over the soft budget; the search is aborted
    /// mid-iteration past this point.
    pub hard_time_factor: u64,

    /// Maximum iterative-deepening depth.
    pub max_depth: i32,
}

impl Default for SearchParams {
    fn default() -> SearchParams {
        SearchParams {
            rfp_margin: 100,
            nmp_min_depth: 2,
            nmp_base_reduction: 3,
            nmp_depth_divisor: 5,
            nmp_material_guard: true,
            futility_margin: 120,
            lmp_max_depth: 3,
            lmp_base: 3,
            lmr_min_depth: 3,
            lmr_move_threshold: 8,
            lmr_reduction: 3,
            aspiration_delta: 20,
            aspiration_widening: 65,
            mate_distance_stop: 10,
            soft_time_fraction: 30,
            hard_time_factor: 2,
            max_depth: 64,
        }
    }
}

impl SearchParams {
    /// A configuration with every selective-pruning heuristic neutralised:
    /// the search degenerates to plain alpha-beta with quiescence. Useful
    /// for verifying that pruning only changes effort, not minimax values.
    pub fn without_pruning() -> SearchParams {
        // Margins far beyond any reachable score, depths beyond max_depth:
        // the conditions can never fire, and the arithmetic stays well
        // inside i32 range.
        SearchParams {
            rfp_margin: 1_000_000,
            nmp_min_depth: 1_000,
            futility_margin: 1_000_000,
            lmp_max_depth: 0,
            lmr_min_depth: 1_000,
            ..SearchParams::default()
        }
    }
}
