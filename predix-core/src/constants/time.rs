//! Time-Related Constants
//!
//! Unit conversions and the dashboard refresh cadence.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u64 = MS_PER_SECOND * SECONDS_PER_MINUTE;

// ===== REFRESH CADENCE =====

/// Interval between automatic evaluations (milliseconds).
///
/// Each tick re-scores the current snapshot and appends a system check alert.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 30 * MS_PER_SECOND;

/// Delay before the first automatic evaluation after start-up (milliseconds).
pub const INITIAL_REFRESH_DELAY_MS: u64 = 100;

/// Upper bound on a single remote prediction attempt (milliseconds).
///
/// One attempt per cycle; when it expires the local predictor answers.
pub const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 3000;
