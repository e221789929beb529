//! Health scoring engine for Predix
//!
//! Maps a snapshot of four machine sensors (temperature, vibration,
//! pressure, rpm) to a health prediction using fixed, built-in thresholds.
//! Everything here is synchronous and free of ambient state: callers own the
//! snapshot, the alert log and the random source used for remaining-life
//! estimates.
//!
//! Two levels of prediction are produced:
//! - Per sensor: [`classify_sensor`] places a reading in its optimal,
//!   warning or critical band.
//! - System wide: [`predict_system_health`] derives a health score from
//!   capped deviation penalties and projects it to status, failure risk,
//!   remaining useful life and a root cause.
//!
//! ```rust
//! use predix_core::{predict_system_health, HealthStatus, SensorSnapshot};
//!
//! let snapshot = SensorSnapshot::new(85.0, 8.5, 180.0, 3200);
//! let prediction = predict_system_health(&snapshot);
//!
//! assert_eq!(prediction.health_status, HealthStatus::Critical);
//! assert!(prediction.anomaly_detected);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

pub mod alerts;
pub mod classifier;
pub mod constants;
pub mod errors;
pub mod monitor;
pub mod predictor;
pub mod rul;
pub mod sensors;
pub mod time;
pub mod validators;

// Public API
pub use alerts::{
    sensor_alert_candidates, should_emit_alert, system_alert_candidate, Alert, AlertCandidate, AlertLog,
    Severity,
};
pub use classifier::{classify_sensor, classify_snapshot, RiskLevel, SensorPrediction, SensorPredictions, SensorStatus};
pub use errors::{ValidationError, ValidationResult};
pub use monitor::{Evaluation, Monitor, MonitorStats, PredictionSource, ReadingRecord};
pub use predictor::{
    health_score, predict_system_health, root_cause_details, CauseDetail, HealthScore, HealthStatus, LocalPredictor,
    Predictor, RootCause, SystemPrediction,
};
pub use sensors::{Range, SensorKind, SensorRanges, SensorSnapshot};
pub use time::{TimeSource, Timestamp};
pub use validators::SnapshotValidator;

/// Crate version, reported in the remote client's user agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
