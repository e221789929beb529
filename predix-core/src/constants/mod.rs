//! Constants for Predix Core
//!
//! Every threshold, penalty and limit the scoring engine uses lives here so
//! the rule tables can be read in one place.
//!
//! ## Organization
//!
//! - **Sensors**: classification bands and absolute input limits
//! - **Scoring**: deviation cutoffs, penalty slopes and caps, status cutoffs
//! - **Alerts**: log capacity and deduplication window
//! - **Time**: unit conversions and refresh timing

/// Classification bands and absolute input limits per sensor.
pub mod sensors;

/// Health score deviation penalties and status thresholds.
pub mod scoring;

/// Alert log capacity and deduplication window.
pub mod alerts;

/// Time unit conversions and refresh intervals.
pub mod time;

// Re-export commonly used constants for convenience
pub use alerts::{ALERT_DEDUP_WINDOW_MS, MAX_ALERTS};
pub use scoring::{CRITICAL_SCORE_THRESHOLD, WARNING_SCORE_THRESHOLD};
pub use time::{DEFAULT_REFRESH_INTERVAL_MS, MS_PER_MINUTE, MS_PER_SECOND};
