//! Alert Log Constants

use super::time::MS_PER_MINUTE;

/// Maximum number of alerts retained, newest first.
///
/// Pushing past this evicts the oldest entry.
pub const MAX_ALERTS: usize = 10;

/// Window in which a repeated sensor alert with the same severity is suppressed (milliseconds).
pub const ALERT_DEDUP_WINDOW_MS: u64 = 5 * MS_PER_MINUTE;

/// Number of alerts listed in the "recent alerts" section of a report.
pub const REPORT_RECENT_ALERTS: usize = 5;

/// Maximum number of evaluated readings kept in the monitor history.
///
/// Oldest entries are dropped first.
pub const MAX_HISTORY: usize = 1000;
