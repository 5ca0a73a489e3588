//! Centralized tuning constants for the draft lottery.
//!
//! These values define the default lottery math. Callers override the
//! movement cap and attempt ceiling through `LotterySettings`; the weight
//! step is fixed.

// Movement rules -----------------------------------------------------------
pub const DEFAULT_MAX_MOVEMENT: u32 = 2;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;
/// Per-position multiplier applied to a candidate's weight for each slot moved.
pub const MOVEMENT_WEIGHT_STEP: f64 = 0.2;

// Default league -----------------------------------------------------------
pub const DEFAULT_TEAM_COUNT: u32 = 10;
pub const DEFAULT_ROUND_COUNT: u32 = 5;
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 1500;
/// Default odds, indexed by original position minus one.
pub const DEFAULT_ODDS_PERCENTAGES: [f64; 10] =
    [3.1, 3.9, 4.6, 5.5, 6.4, 8.0, 10.6, 14.1, 18.8, 25.0];

// Validation ---------------------------------------------------------------
pub(crate) const ODDS_TOTAL_TARGET: f64 = 100.0;
pub(crate) const ODDS_TOTAL_TOLERANCE: f64 = 0.5;

// RNG stream tags ----------------------------------------------------------
pub(crate) const ROUND_STREAM_PREFIX: &str = "round-";
