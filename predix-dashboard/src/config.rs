//! Environment configuration
//!
//! | variable | default | meaning |
//! |---|---|---|
//! | `PREDIX_API_URL` | `http://localhost:8000` | prediction service base URL, empty disables it |
//! | `PREDIX_API_TIMEOUT_MS` | `3000` | bound on one remote attempt |
//! | `PREDIX_REFRESH_SECS` | `30` | refresh period |
//! | `PREDIX_DATA_DIR` | `./predix-data` | where the file store keeps its documents |
//!
//! The binary loads a `.env` file with `dotenvy` before reading these.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use predix_core::constants::time::{DEFAULT_REFRESH_INTERVAL_MS, DEFAULT_REMOTE_TIMEOUT_MS};

use crate::error::{DashboardError, DashboardResult};

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_DATA_DIR: &str = "./predix-data";

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Prediction service base URL; `None` means local scoring only
    pub api_url: Option<String>,
    /// Timeout for one remote attempt
    pub api_timeout: Duration,
    /// Time between automatic refreshes
    pub refresh_interval: Duration,
    /// File store directory
    pub data_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: Some(DEFAULT_API_URL.to_string()),
            api_timeout: Duration::from_millis(DEFAULT_REMOTE_TIMEOUT_MS),
            refresh_interval: Duration::from_millis(DEFAULT_REFRESH_INTERVAL_MS),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> DashboardResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> DashboardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = match lookup("PREDIX_API_URL") {
            None => defaults.api_url,
            Some(url) if url.trim().is_empty() => None,
            Some(url) => Some(url.trim().trim_end_matches('/').to_string()),
        };

        let api_timeout = parse_var::<u64, _>(&lookup, "PREDIX_API_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.api_timeout);

        let refresh_interval = parse_var::<u64, _>(&lookup, "PREDIX_REFRESH_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.refresh_interval);
        if refresh_interval.is_zero() {
            return Err(DashboardError::Config("PREDIX_REFRESH_SECS must be at least 1".into()));
        }

        let data_dir = lookup("PREDIX_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        Ok(Self {
            api_url,
            api_timeout,
            refresh_interval,
            data_dir,
        })
    }

    /// Whether a remote prediction service is configured
    pub fn remote_enabled(&self) -> bool {
        self.api_url.is_some()
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> DashboardResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| DashboardError::Config(format!("{}={:?}: {}", name, raw, e))),
    }
}
