#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable search heuristics. Depths are in plies, margins in centipawns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[allow(clippy::struct_excessive_bools)]
pub struct SearchParams {
    /// Look up and store in the main transposition table.
    pub use_tt: bool,
    /// Age (in searches) after which a colliding entry may be evicted.
    pub tt_max_age: u16,

    pub null_move: bool,
    pub null_reduction: i32,
    pub null_min_depth: i32,

    pub reverse_futility: bool,
    pub rfp_max_depth: i32,
    pub rfp_margin: i32,

    pub razoring: bool,
    pub razor_max_depth: i32,
    pub razor_margin: i32,

    pub futility: bool,
    pub futility_max_depth: i32,
    pub futility_margin: i32,

    pub lmr: bool,
    pub lmr_min_depth: i32,
    /// Legal moves searched at full depth before reductions start.
    pub lmr_min_move: usize,

    pub iid: bool,
    pub iid_min_depth: i32,
    pub iid_reduction: i32,

    /// Resolve captures at the horizon; off means leaves return the static score.
    pub quiescence: bool,
    pub delta_pruning: bool,
    pub delta_margin: i32,
    /// Non-pawn material (both sides) required before delta pruning applies.
    pub delta_min_material: i32,

    /// Check extensions allowed along one line.
    pub max_check_extensions: u32,

    pub aspiration_min_depth: u32,
    pub aspiration_window: i32,

    /// Nodes between clock checks.
    pub poll_interval: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            use_tt: true,
            tt_max_age: 2,
            null_move: true,
            null_reduction: 2,
            null_min_depth: 3,
            reverse_futility: true,
            rfp_max_depth: 3,
            rfp_margin: 120,
            razoring: true,
            razor_max_depth: 3,
            razor_margin: 300,
            futility: true,
            futility_max_depth: 2,
            futility_margin: 150,
            lmr: true,
            lmr_min_depth: 3,
            lmr_min_move: 4,
            iid: true,
            iid_min_depth: 5,
            iid_reduction: 2,
            quiescence: true,
            delta_pruning: true,
            delta_margin: 200,
            delta_min_material: 1300,
            max_check_extensions: 16,
            aspiration_min_depth: 4,
            aspiration_window: 35,
            poll_interval: 1024,
        }
    }
}

impl SearchParams {
    /// Every heuristic that can change the minimax value switched off.
    ///
    /// Move ordering, internal iterative deepening and mate-distance pruning
    /// stay on since they only affect speed.
    #[must_use]
    pub fn unpruned() -> Self {
        SearchParams {
            null_move: false,
            reverse_futility: false,
            razoring: false,
            futility: false,
            lmr: false,
            delta_pruning: false,
            max_check_extensions: 0,
            ..SearchParams::default()
        }
    }
}
