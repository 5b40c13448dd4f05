//! Time budgeting for a single move.
//!
//! Turns the clock state a GUI sends into a soft limit (do not start another
//! iteration past it) and a hard limit (abort the running iteration).

use std::time::Duration;

use crate::board::SearchConfig;

/// Time threshold below which we enter "panic mode" (in ms)
const PANIC_THRESHOLD_MS: u64 = 5000;

/// Minimum moves-to-go estimate to avoid over-thinking
const MIN_MOVES_TO_GO: u64 = 10;

/// Safety margin added to overhead for critical time detection
const CRITICAL_TIME_MARGIN_MS: u64 = 50;

/// Panic mode: share of the remaining time at the panic threshold, in per mille.
const PANIC_PER_MILLE: u64 = 50;

/// Time thresholds for moves-to-go estimation (in ms)
const LONG_TIME_CONTROL_MS: u64 = 300_000;
const MEDIUM_TIME_CONTROL_MS: u64 = 60_000;

/// Moves-to-go estimates for long, medium and short remaining times.
const MOVES_ESTIMATE: [u64; 3] = [40, 30, 25];

#[derive(Debug, Clone, Copy)]
pub struct TimeConfig {
    /// Time reserved for communication latency.
    pub move_overhead_ms: u64,
    /// Cap on the soft limit, as a percentage of the safe remaining time.
    pub soft_time_percent: u64,
    /// Cap on the hard limit, as a percentage of the safe remaining time.
    pub hard_time_percent: u64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            move_overhead_ms: 50,
            soft_time_percent: 70,
            hard_time_percent: 90,
        }
    }
}

/// How much time the engine has for the next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeControl {
    /// No clock; the search ends on depth, nodes or `stop`.
    #[default]
    Infinite,
    /// Fixed time per move
    MoveTime { time_ms: u64 },
    /// Remaining clock time plus increment
    Incremental {
        time_left_ms: u64,
        inc_ms: u64,
        movestogo: Option<u64>,
    },
}

impl TimeControl {
    #[must_use]
    pub fn incremental(time_left: Duration, inc: Duration, movestogo: Option<u64>) -> Self {
        TimeControl::Incremental {
            time_left_ms: time_left.as_millis() as u64,
            inc_ms: inc.as_millis() as u64,
            movestogo,
        }
    }

    #[must_use]
    pub fn move_time_ms(time_ms: u64) -> Self {
        TimeControl::MoveTime { time_ms }
    }

    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        matches!(self, TimeControl::Infinite)
    }

    /// `(soft_ms, hard_ms)`; `(0, 0)` means no time limit.
    #[must_use]
    pub fn compute_limits(&self, config: &TimeConfig) -> (u64, u64) {
        match *self {
            TimeControl::Infinite => (0, 0),
            // An explicit movetime is used as given, overhead included.
            TimeControl::MoveTime { time_ms } => {
                let budget = time_ms.max(1);
                (budget, budget)
            }
            TimeControl::Incremental {
                time_left_ms,
                inc_ms,
                movestogo,
            } => incremental_limits(time_left_ms, inc_ms, movestogo, config),
        }
    }

    /// Limits for one search, combined with optional depth and node caps.
    #[must_use]
    pub fn search_config(&self, config: &TimeConfig, depth: Option<u32>, nodes: Option<u64>) -> SearchConfig {
        let (soft_ms, hard_ms) = self.compute_limits(config);
        SearchConfig {
            max_depth: depth,
            soft_time_ms: soft_ms,
            hard_time_ms: hard_ms,
            node_limit: nodes.unwrap_or(0),
            info_callback: None,
        }
    }
}

fn incremental_limits(time_left_ms: u64, inc_ms: u64, movestogo: Option<u64>, config: &TimeConfig) -> (u64, u64) {
    let safe_ms = time_left_ms.saturating_sub(config.move_overhead_ms);

    if time_left_ms <= config.move_overhead_ms.saturating_add(CRITICAL_TIME_MARGIN_MS) {
        let fallback = (time_left_ms / 2).max(1);
        return (fallback, fallback);
    }

    // Scale the share down linearly as the clock approaches zero.
    if safe_ms < PANIC_THRESHOLD_MS {
        let target = safe_ms * safe_ms * PANIC_PER_MILLE / (PANIC_THRESHOLD_MS * 1000) + inc_ms;
        let target = target.min(safe_ms / 5).max(1);
        let hard = (safe_ms / 3).max(target);
        return (target, hard);
    }

    let moves_to_go = movestogo
        .unwrap_or(if safe_ms > LONG_TIME_CONTROL_MS {
            MOVES_ESTIMATE[0]
        } else if safe_ms > MEDIUM_TIME_CONTROL_MS {
            MOVES_ESTIMATE[1]
        } else {
            MOVES_ESTIMATE[2]
        })
        .max(MIN_MOVES_TO_GO);

    let base_time = safe_ms / moves_to_go + inc_ms;
    let soft_cap = safe_ms * config.soft_time_percent / 100;
    let hard_cap = safe_ms * config.hard_time_percent / 100;

    let soft_ms = base_time.min(soft_cap).max(1);
    let hard_ms = hard_cap.min(soft_ms * 4).max(soft_ms);
    (soft_ms, hard_ms)
}
