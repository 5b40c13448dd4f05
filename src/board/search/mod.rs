//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening with aspiration windows
//! - Principal variation search over NodeType-tagged nodes
//! - Null move, reverse futility, razoring, futility and late move reductions
//! - Internal iterative deepening and check extensions
//! - Quiescence search with stand-pat and delta pruning
//! - Move ordering (hash move, MVV-LVA, history)
//! - Transposition table plus a PV-only table for line reconstruction

mod alphabeta;
mod constants;
mod move_order;
mod params;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::tt::{TranspositionTable, DEFAULT_TT_MB};

use super::eval::{Evaluator, MaterialEvaluator};
use super::{Board, Move};

pub use constants::{DRAW_SCORE, INFINITY, MATE_SCORE, MATE_THRESHOLD, MAX_PLY};
pub use params::SearchParams;

pub(crate) use alphabeta::{NodeType, SearchContext};
pub(crate) use move_order::order_moves;

/// Slots in the PV-only table; it only ever holds one iteration's PV nodes.
const PV_TABLE_ENTRIES: usize = 1 << 14;

/// Outcome of a search.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal move.
    pub best_move: Option<Move>,
    /// Side-to-move relative centipawns, or a mate score.
    pub score: i32,
    pub pv: Vec<Move>,
    pub nodes: u64,
    /// Last fully completed iteration.
    pub depth: u32,
    pub seldepth: u32,
}

/// Statistics tracked during search
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub seldepth: u32,
    pub tt_hits: u64,
}

impl SearchStats {
    pub fn reset(&mut self) {
        *self = SearchStats::default();
    }
}

const HISTORY_SLOTS: usize = 12 * 64;

/// Quiet-move history indexed by (moving piece, target square).
pub struct HistoryTable {
    entries: Box<[i32; HISTORY_SLOTS]>,
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    #[must_use]
    pub fn new() -> Self {
        HistoryTable {
            entries: Box::new([0; HISTORY_SLOTS]),
        }
    }

    fn index(mv: &Move) -> usize {
        let slot = if mv.piece > 0 {
            (mv.piece - 1) as usize
        } else {
            (5 - mv.piece) as usize
        };
        slot * 64 + mv.to.index64()
    }

    #[must_use]
    pub fn score(&self, mv: &Move) -> i32 {
        self.entries[Self::index(mv)]
    }

    /// Credit a quiet move that caused a beta cutoff by depth squared.
    ///
    /// The whole table is halved once any entry passes the limit.
    pub fn reward(&mut self, mv: &Move, depth: i32) {
        let entry = &mut self.entries[Self::index(mv)];
        *entry = entry.saturating_add(depth * depth);
        if *entry > constants::HISTORY_LIMIT {
            for value in self.entries.iter_mut() {
                *value /= 2;
            }
        }
    }

    pub fn reset(&mut self) {
        self.entries.fill(0);
    }
}

/// Per-engine search context: tables, parameters and the evaluator.
///
/// Nothing here is global; two states can search two boards side by side.
pub struct SearchState {
    pub(crate) tt: TranspositionTable,
    pub(crate) pv_table: TranspositionTable,
    pub(crate) history: HistoryTable,
    pub stats: SearchStats,
    pub params: SearchParams,
    /// Bumped once per search; drives transposition table aging.
    pub generation: u16,
    evaluator: Box<dyn Evaluator>,
}

impl SearchState {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        SearchState {
            tt: TranspositionTable::new(tt_mb),
            pv_table: TranspositionTable::with_entries(PV_TABLE_ENTRIES),
            history: HistoryTable::new(),
            stats: SearchStats::default(),
            params: SearchParams::default(),
            generation: 0,
            evaluator: Box::new(MaterialEvaluator),
        }
    }

    /// Replace the evaluation oracle.
    #[must_use]
    pub fn with_evaluator<E: Evaluator + 'static>(mut self, evaluator: E) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    pub fn set_params(&mut self, params: SearchParams) {
        self.params = params;
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SearchParams {
        &mut self.params
    }

    #[must_use]
    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    pub(crate) fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }

    /// Reset per-search state and advance the cache generation.
    pub fn new_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.stats.reset();
        self.history.reset();
        self.tt.set_max_age(self.params.tt_max_age);
    }

    /// Reallocate the main table, dropping everything learned so far.
    pub fn reset_tables(&mut self, tt_mb: usize) {
        self.tt = TranspositionTable::new(tt_mb);
        self.pv_table.clear();
        self.history.reset();
        self.stats.reset();
    }

    /// Forget cached results without reallocating (new game).
    pub fn clear(&mut self) {
        self.tt.clear();
        self.pv_table.clear();
        self.history.reset();
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        self.tt.hashfull_per_mille()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::new(DEFAULT_TT_MB)
    }
}

/// Configuration for a single search.
#[derive(Clone, Default)]
pub struct SearchConfig {
    /// Maximum depth to search (None = up to `MAX_PLY`)
    pub max_depth: Option<u32>,
    /// Do not start a new iteration after this many milliseconds (0 = unlimited)
    pub soft_time_ms: u64,
    /// Abort the running iteration after this many milliseconds (0 = unlimited)
    pub hard_time_ms: u64,
    /// Node limit (0 = unlimited), checked at every node so the search
    /// never visits more than a handful of nodes past it
    pub node_limit: u64,
    /// Optional callback for iteration info
    pub info_callback: Option<SearchInfoCallback>,
}

impl SearchConfig {
    /// Create a depth-limited search config
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchConfig {
            max_depth: Some(max_depth),
            ..Default::default()
        }
    }

    /// Fixed time per move: iterations stop starting at half the budget.
    #[must_use]
    pub fn time(time_limit_ms: u64) -> Self {
        SearchConfig::default().with_time_limits(time_limit_ms / 2, time_limit_ms)
    }

    #[must_use]
    pub fn with_time_limits(mut self, soft_ms: u64, hard_ms: u64) -> Self {
        self.soft_time_ms = soft_ms;
        self.hard_time_ms = hard_ms;
        self
    }

    #[must_use]
    pub fn with_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Set node limit
    #[must_use]
    pub fn with_nodes(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// Attach a callback for iteration info reporting.
    #[must_use]
    pub fn with_info_callback(mut self, callback: SearchInfoCallback) -> Self {
        self.info_callback = Some(callback);
        self
    }
}

/// Information about a completed search iteration.
#[derive(Debug, Clone)]
pub struct SearchIterationInfo {
    pub depth: u32,
    pub seldepth: u32,
    pub score: i32,
    /// Moves to mate, negative when getting mated.
    pub mate_in: Option<i32>,
    pub nodes: u64,
    pub nps: u64,
    pub time_ms: u64,
    pub tt_hits: u64,
    pub hashfull: u32,
    pub pv: String,
}

/// Callback type for iteration info.
pub type SearchInfoCallback = Arc<dyn Fn(&SearchIterationInfo) + Send + Sync>;

/// Full moves to mate for a mate score, `None` otherwise.
#[must_use]
pub fn mate_in(score: i32) -> Option<i32> {
    if score.abs() < MATE_THRESHOLD {
        None
    } else if score > 0 {
        Some((MATE_SCORE - score + 1) / 2)
    } else {
        Some(-(MATE_SCORE + score + 1) / 2)
    }
}

/// Run iterative deepening on `board` within the limits of `config`.
///
/// The board is restored before returning. Raising `stop` aborts the running
/// iteration; the result then comes from the last completed one.
///
/// # Example
/// ```
/// use std::sync::atomic::AtomicBool;
/// use mailbox_engine::board::{search, Board, SearchConfig, SearchState};
///
/// let mut board = Board::new();
/// let mut state = SearchState::new(1);
/// let result = search(&mut board, &mut state, &SearchConfig::depth(3), &AtomicBool::new(false));
/// assert!(result.best_move.is_some());
/// ```
pub fn search(
    board: &mut Board,
    state: &mut SearchState,
    config: &SearchConfig,
    stop: &AtomicBool,
) -> SearchResult {
    state.new_search();
    let mut ctx = SearchContext::new(board, state, config, stop);
    ctx.iterative_deepening()
}

/// Depth-limited search returning only the move.
pub fn find_best_move(
    board: &mut Board,
    state: &mut SearchState,
    max_depth: u32,
    stop: &AtomicBool,
) -> Option<Move> {
    search(board, state, &SearchConfig::depth(max_depth), stop).best_move
}
