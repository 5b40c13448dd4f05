//! Search constants.

// ============================================================================
// SCORES
// ============================================================================

/// Score of being mated at the root; mate at ply `p` scores `MATE_SCORE - p`.
pub const MATE_SCORE: i32 = 30000;

/// Deepest ply the search will reach, extensions included.
pub const MAX_PLY: usize = 128;

/// Scores with absolute value >= this are mate scores.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

/// Wider than any reachable score.
pub const INFINITY: i32 = 32000;

pub const DRAW_SCORE: i32 = 0;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher is tried earlier: hash move > promotions > captures > castling > quiet.

pub const TT_MOVE_PRIORITY: i32 = 1_000_000;
pub const PROMOTION_PRIORITY: i32 = 900_000;
pub const CAPTURE_PRIORITY: i32 = 500_000;
pub const CASTLE_PRIORITY: i32 = 400_000;

/// History entries are halved table-wide once one passes this value.
pub const HISTORY_LIMIT: i32 = 1 << 20;

// ============================================================================
// ASPIRATION
// ============================================================================

/// Past this half-width the aspiration loop falls back to a full window.
pub const ASPIRATION_MAX_DELTA: i32 = 1000;
