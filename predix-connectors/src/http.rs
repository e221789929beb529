//! HTTP Client for a Remote Prediction Service
//!
//! ## Overview
//!
//! Posts a [`SensorSnapshot`] as JSON to `<base_url>/predict` and decodes the
//! service's answer into a [`SystemPrediction`]. The service speaks the same
//! snake_case field names as the local predictor, with two differences that
//! are absorbed here:
//!
//! - `confidence` may be missing; it is then derived from the failure risk
//!   as `max(0.1, 1 - risk / 100)`.
//! - `timestamp` may be present; unknown fields are ignored and evaluation
//!   time is owned by the caller.
//!
//! Numeric fields are accepted as integers or floats and clamped into the
//! ranges a local prediction would produce.
//!
//! ## Failure Handling
//!
//! Exactly one attempt is made per [`HttpPredictor::predict`] call, bounded
//! by [`HttpConfig::timeout`]. Every failure is counted in
//! [`ConnectionStats`] and returned; the caller decides to fall back.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use predix_connectors::http::{HttpConfig, HttpPredictor};
//! use predix_core::{Predictor, SensorSnapshot};
//!
//! let config = HttpConfig::new("https://predict.example.com")
//!     .bearer_token("your-api-token")
//!     .timeout_ms(3000);
//!
//! let mut remote = HttpPredictor::new(config)?;
//! match remote.predict(&SensorSnapshot::anomalous()) {
//!     Ok(prediction) => println!("remote says {}", prediction.health_status),
//!     Err(e) => println!("falling back: {}", e),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use predix_core::constants::scoring::MIN_SYSTEM_CONFIDENCE;
use predix_core::constants::time::DEFAULT_REMOTE_TIMEOUT_MS;
use predix_core::{HealthStatus, Predictor, SensorSnapshot, SystemPrediction};
use serde::Deserialize;
use thiserror::Error;

use crate::ConnectionStats;

/// HTTP-specific errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or request error, including timeouts
    #[error("Request failed: {0}")]
    Request(String),

    /// Server returned error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// HTTP configuration
#[derive(Clone)]
pub struct HttpConfig {
    /// Base URL of the prediction service
    pub base_url: String,
    /// Path of the prediction endpoint
    pub predict_path: String,
    /// Upper bound on one request
    pub timeout: Duration,
    /// Authentication method
    pub auth: AuthMethod,
    /// Custom headers
    pub headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

/// Authentication methods
#[derive(Clone)]
pub enum AuthMethod {
    /// No authentication
    None,
    /// Bearer token
    Bearer(String),
    /// Basic authentication
    Basic { username: String, password: String },
    /// API key in header
    ApiKey { header: String, value: String },
}

const REDACTED: &str = "<redacted>";

impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::None => f.write_str("None"),
            AuthMethod::Bearer(_) => f.debug_tuple("Bearer").field(&REDACTED).finish(),
            AuthMethod::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &REDACTED)
                .finish(),
            AuthMethod::ApiKey { header, .. } => f
                .debug_struct("ApiKey")
                .field("header", header)
                .field("value", &REDACTED)
                .finish(),
        }
    }
}

impl fmt::Debug for HttpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Header values are never printed
        let mut header_names: Vec<&str> = self.headers.keys().map(String::as_str).collect();
        header_names.sort_unstable();

        f.debug_struct("HttpConfig")
            .field("base_url", &self.base_url)
            .field("predict_path", &self.predict_path)
            .field("timeout", &self.timeout)
            .field("auth", &self.auth)
            .field("headers", &header_names)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpConfig {
    /// Create new configuration with base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            predict_path: "/predict".into(),
            timeout: Duration::from_millis(DEFAULT_REMOTE_TIMEOUT_MS),
            auth: AuthMethod::None,
            headers: HashMap::new(),
            user_agent: format!("Predix/{}", predix_core::VERSION),
        }
    }

    /// Set bearer token authentication
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.auth = AuthMethod::Bearer(token.into());
        self
    }

    /// Set basic authentication
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = AuthMethod::Basic {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    /// Set API key authentication
    pub fn api_key(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.auth = AuthMethod::ApiKey {
            header: header.into(),
            value: value.into(),
        };
        self
    }

    /// Set request timeout in milliseconds
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout = Duration::from_millis(ms);
        self
    }

    /// Override the prediction endpoint path
    pub fn predict_path(mut self, path: impl Into<String>) -> Self {
        self.predict_path = path.into();
        self
    }

    /// Add custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Full URL of the prediction endpoint
    pub fn predict_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.predict_path)
    }
}

/// Prediction as sent by the remote service
#[derive(Debug, Deserialize)]
struct PredictionResponse {
    health_status: HealthStatus,
    failure_risk: f32,
    remaining_useful_life: f32,
    anomaly_detected: bool,
    anomaly_probability: f32,
    root_cause: String,
    recommendation: String,
    #[serde(default)]
    confidence: Option<f32>,
}

impl From<PredictionResponse> for SystemPrediction {
    fn from(response: PredictionResponse) -> Self {
        let risk = response.failure_risk.clamp(0.0, 100.0);
        let confidence = response
            .confidence
            .unwrap_or(1.0 - risk / 100.0)
            .clamp(MIN_SYSTEM_CONFIDENCE, 1.0);

        SystemPrediction {
            health_status: response.health_status,
            failure_risk: risk.round() as u8,
            remaining_useful_life: response.remaining_useful_life.max(0.0).round() as u32,
            anomaly_detected: response.anomaly_detected,
            anomaly_probability: response.anomaly_probability.clamp(0.0, 1.0),
            root_cause: response.root_cause,
            recommendation: response.recommendation,
            confidence,
        }
    }
}

/// Decode a prediction service response body
pub fn decode_prediction(body: &str) -> Result<SystemPrediction, HttpError> {
    serde_json::from_str::<PredictionResponse>(body)
        .map(SystemPrediction::from)
        .map_err(|e| HttpError::Serialization(e.to_string()))
}

/// Remote predictor using the lightweight ureq client
pub struct HttpPredictor {
    config: HttpConfig,
    agent: ureq::Agent,
    stats: ConnectionStats,
}

impl fmt::Debug for HttpPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Auth material stays out of logs
        f.debug_struct("HttpPredictor")
            .field("predict_url", &self.config.predict_url())
            .field("timeout", &self.config.timeout)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl HttpPredictor {
    /// Create new remote predictor
    pub fn new(config: HttpConfig) -> Result<Self, HttpError> {
        // Validate base URL
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(HttpError::Config("Base URL must start with http:// or https://".into()));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self {
            config,
            agent,
            stats: ConnectionStats::default(),
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Request statistics
    pub fn stats(&self) -> &ConnectionStats {
        &self.stats
    }

    /// Build request with authentication and headers
    fn build_request(&self) -> ureq::Request {
        let mut request = self.agent.post(&self.config.predict_url());

        match &self.config.auth {
            AuthMethod::None => {}
            AuthMethod::Bearer(token) => {
                request = request.set("Authorization", &format!("Bearer {}", token));
            }
            AuthMethod::Basic { username, password } => {
                let credentials = STANDARD.encode(format!("{}:{}", username, password));
                request = request.set("Authorization", &format!("Basic {}", credentials));
            }
            AuthMethod::ApiKey { header, value } => {
                request = request.set(header, value);
            }
        }

        for (name, value) in &self.config.headers {
            request = request.set(name, value);
        }

        request
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
    }

    fn send(&mut self, snapshot: &SensorSnapshot) -> Result<SystemPrediction, HttpError> {
        let json = serde_json::to_string(snapshot).map_err(|e| HttpError::Serialization(e.to_string()))?;

        let response = match self.build_request().send_string(&json) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(HttpError::ServerError {
                    status: code,
                    message: response.into_string().unwrap_or_default(),
                });
            }
            Err(ureq::Error::Transport(e)) => return Err(HttpError::Request(e.to_string())),
        };

        self.stats.bytes_sent += json.len() as u64;

        let body = response.into_string().map_err(|e| HttpError::Request(e.to_string()))?;
        decode_prediction(&body)
    }
}

impl Predictor for HttpPredictor {
    type Error = HttpError;

    fn predict(&mut self, snapshot: &SensorSnapshot) -> Result<SystemPrediction, Self::Error> {
        match self.send(snapshot) {
            Ok(prediction) => {
                self.stats.requests_succeeded += 1;
                log::debug!(
                    "remote prediction from {}: {} ({}%)",
                    self.config.base_url,
                    prediction.health_status,
                    prediction.failure_risk
                );
                Ok(prediction)
            }
            Err(e) => {
                self.stats.requests_failed += 1;
                self.stats.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
