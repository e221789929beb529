//! Remote Prediction and Refresh Plumbing for Predix
//!
//! ## Overview
//!
//! The scoring engine in `predix-core` is synchronous and self-contained.
//! This crate adds the two pieces that talk to the outside world:
//!
//! - [`http`]: a blocking client for a remote prediction service. It
//!   implements [`predix_core::Predictor`], so a [`predix_core::Monitor`]
//!   can try it first and fall back to the local rules when it fails.
//! - [`scheduler`]: a tokio task that re-triggers evaluation on a fixed
//!   interval and stops through a cancellation handle.
//!
//! ## Remote Call Contract
//!
//! One attempt per refresh, bounded by a timeout. Transport errors, non-2xx
//! responses and undecodable bodies all come back as an [`http::HttpError`];
//! the caller logs it and answers locally. There is no retry and no backoff:
//! the next refresh is the retry.
//!
//! ```text
//! refresh tick ──▶ HttpPredictor::predict ──ok──▶ remote prediction
//!                         │
//!                  timeout/refused/5xx/bad JSON
//!                         │
//!                         ▼
//!                 predict_system_health (local)
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use predix_connectors::http::{HttpConfig, HttpPredictor};
//! use predix_core::Monitor;
//! use rand::thread_rng;
//!
//! let config = HttpConfig::new("http://localhost:8000").timeout_ms(3000);
//! let mut remote = HttpPredictor::new(config)?;
//! let mut monitor = Monitor::new();
//!
//! // Milliseconds since the Unix epoch
//! let now = 1_700_000_000_000;
//! let evaluation = monitor.evaluate(Some(&mut remote), now, &mut thread_rng());
//! println!("answered by {:?}", evaluation.source);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "scheduler")]
pub mod scheduler;

#[cfg(feature = "http")]
pub use http::{AuthMethod, HttpConfig, HttpError, HttpPredictor};

#[cfg(feature = "scheduler")]
pub use scheduler::{RefreshHandle, RefreshScheduler, SchedulerConfig};

use thiserror::Error;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("No async runtime: {0}")]
    NoRuntime(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Request statistics common to all connectors
#[derive(Debug, Default, Clone)]
pub struct ConnectionStats {
    /// Requests answered successfully
    pub requests_succeeded: u64,
    /// Requests that failed for any reason
    pub requests_failed: u64,
    /// Total request body bytes sent
    pub bytes_sent: u64,
    /// Last error message
    pub last_error: Option<String>,
}

impl ConnectionStats {
    /// Share of requests that succeeded, `None` before the first request
    pub fn success_rate(&self) -> Option<f32> {
        let total = self.requests_succeeded + self.requests_failed;
        if total == 0 {
            None
        } else {
            Some(self.requests_succeeded as f32 / total as f32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate() {
        let mut stats = ConnectionStats::default();
        assert_eq!(stats.success_rate(), None);

        stats.requests_succeeded = 3;
        stats.requests_failed = 1;
        assert_eq!(stats.success_rate(), Some(0.75));
    }
}
