//! Alert Log with Time-Window Deduplication
//!
//! ## Overview
//!
//! Evaluations produce alert *candidates*: one per alerting sensor plus one
//! for a degraded system status. Candidates pass a deduplication gate before
//! they reach the log, so a machine sitting in a bad state does not flood the
//! operator with the same message every refresh.
//!
//! ### Deduplication
//!
//! A candidate is suppressed when the log already holds an alert that
//!
//! 1. has a title containing the same label (e.g. `"AI Temperature Analysis"`),
//! 2. has the same severity, and
//! 3. was recorded strictly after `now - 5 min`.
//!
//! Escalation is never suppressed: a critical temperature alert still fires
//! while a warning temperature alert is inside the window.
//!
//! ### Bounded Storage
//!
//! The log keeps at most [`MAX_ALERTS`] entries, newest first, in a
//! `heapless::Deque`. Pushing into a full log evicts the oldest entry:
//!
//! ```text
//! push_front(new)         ┌─────┬─────┬─────┬ ─ ─ ┬─────┐
//!        └──────────────▶ │ new │  1  │  2  │ ... │  9  │ ──▶ oldest evicted
//!                         └─────┴─────┴─────┴ ─ ─ ┴─────┘
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use predix_core::{AlertCandidate, AlertLog, SensorSnapshot, Severity};
//!
//! let mut log = AlertLog::new();
//! let snapshot = SensorSnapshot::anomalous();
//! let candidate = AlertCandidate::new(
//!     "AI Temperature Analysis",
//!     85.0,
//!     Severity::Critical,
//!     "Temperature exceeds safe operating limits",
//!     "Check cooling system and ventilation",
//! );
//!
//! assert!(log.record(&candidate, 1_000, snapshot).is_some());
//! // Same label and severity one second later: suppressed
//! assert!(log.record(&candidate, 2_000, snapshot).is_none());
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use heapless::Deque;
use serde::{Deserialize, Serialize};

use crate::classifier::{SensorPredictions, SensorStatus};
use crate::constants::alerts::{ALERT_DEDUP_WINDOW_MS, MAX_ALERTS};
use crate::predictor::{HealthStatus, SystemPrediction};
use crate::sensors::SensorSnapshot;
use crate::time::Timestamp;

/// Label used for system-level alerts
pub const SYSTEM_ALERT_LABEL: &str = "AI System Health";

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, e.g. a healthy system check
    Info,
    /// Needs attention
    Warning,
    /// Needs action now
    Critical,
}

impl Severity {
    /// Severity for a sensor status; normal readings raise no alert
    pub const fn for_sensor(status: SensorStatus) -> Option<Self> {
        match status {
            SensorStatus::Critical => Some(Severity::Critical),
            SensorStatus::Warning => Some(Severity::Warning),
            SensorStatus::Normal => None,
        }
    }

    /// Severity for a system status
    pub const fn for_health(status: HealthStatus) -> Self {
        match status {
            HealthStatus::Critical => Severity::Critical,
            HealthStatus::Warning => Severity::Warning,
            HealthStatus::Healthy => Severity::Info,
        }
    }

    /// Lowercase name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique within one log
    pub id: u64,
    /// Severity
    pub severity: Severity,
    /// `"<label>: <headline>"`
    pub title: String,
    /// Recommendation and triggering value
    pub message: String,
    /// When the alert was recorded (ms since epoch)
    pub timestamp: Timestamp,
    /// Readings at the time of the alert
    pub snapshot: SensorSnapshot,
}

/// An alert that has not passed the deduplication gate yet
#[derive(Debug, Clone, PartialEq)]
pub struct AlertCandidate {
    /// Dedup key, also the title prefix
    pub label: &'static str,
    /// Value that triggered the alert
    pub value: f32,
    /// Severity
    pub severity: Severity,
    /// Text after the label in the title
    pub headline: String,
    /// Recommended action
    pub recommendation: String,
}

impl AlertCandidate {
    /// Create a candidate
    pub fn new(
        label: &'static str,
        value: f32,
        severity: Severity,
        headline: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            label,
            value,
            severity,
            headline: headline.into(),
            recommendation: recommendation.into(),
        }
    }

    /// Title the alert will carry
    pub fn title(&self) -> String {
        format!("{}: {}", self.label, self.headline)
    }

    /// Message the alert will carry
    pub fn message(&self) -> String {
        format!("{} (Current value: {})", self.recommendation, self.value)
    }
}

/// Candidates for every sensor in a warning or critical state, in evaluation order
pub fn sensor_alert_candidates(predictions: &SensorPredictions) -> Vec<AlertCandidate> {
    predictions
        .iter()
        .filter_map(|prediction| {
            Severity::for_sensor(prediction.status).map(|severity| {
                AlertCandidate::new(
                    prediction.sensor.alert_label(),
                    prediction.value,
                    severity,
                    prediction.prediction,
                    prediction.recommendation,
                )
            })
        })
        .collect()
}

/// Candidate for a degraded system status, `None` when healthy
pub fn system_alert_candidate(prediction: &SystemPrediction) -> Option<AlertCandidate> {
    let (severity, headline) = match prediction.health_status {
        HealthStatus::Critical => (Severity::Critical, "System health critical"),
        HealthStatus::Warning => (Severity::Warning, "System health warning"),
        HealthStatus::Healthy => return None,
    };

    Some(AlertCandidate::new(
        SYSTEM_ALERT_LABEL,
        prediction.failure_risk as f32,
        severity,
        format!("{}: {}", headline, prediction.root_cause),
        prediction.recommendation.clone(),
    ))
}

/// Deduplication gate
///
/// Returns `false` when an alert with a title containing `label` and the same
/// `severity` is strictly newer than `now - 5 min`.
pub fn should_emit_alert<'a, I>(existing: I, label: &str, severity: Severity, now: Timestamp) -> bool
where
    I: IntoIterator<Item = &'a Alert>,
{
    let window_start = now.saturating_sub(ALERT_DEDUP_WINDOW_MS);

    !existing.into_iter().any(|alert| {
        alert.severity == severity && alert.timestamp > window_start && alert.title.contains(label)
    })
}

/// Bounded, newest-first alert list
#[derive(Debug, Clone)]
pub struct AlertLog {
    alerts: Deque<Alert, MAX_ALERTS>,
    next_id: u64,
}

impl AlertLog {
    /// Create an empty log
    pub const fn new() -> Self {
        Self {
            alerts: Deque::new(),
            next_id: 1,
        }
    }

    /// Rebuild a log from persisted alerts, newest first
    ///
    /// Entries past the capacity are dropped.
    pub fn from_alerts<I: IntoIterator<Item = Alert>>(alerts: I) -> Self {
        let mut log = Self::new();
        for alert in alerts.into_iter().take(MAX_ALERTS) {
            log.next_id = log.next_id.max(alert.id.saturating_add(1));
            // Capacity is checked by take()
            let _ = log.alerts.push_back(alert);
        }
        log
    }

    /// Insert at the front, evicting the oldest entry when full
    ///
    /// Returns the id assigned to the new alert.
    pub fn push(
        &mut self,
        severity: Severity,
        title: String,
        message: String,
        timestamp: Timestamp,
        snapshot: SensorSnapshot,
    ) -> u64 {
        if self.alerts.is_full() {
            self.alerts.pop_back();
        }

        let id = self.next_id;
        let alert = Alert {
            id,
            severity,
            title,
            message,
            timestamp,
            snapshot,
        };
        self.next_id += 1;

        // Room was made above
        let _ = self.alerts.push_front(alert);
        id
    }

    /// Run `candidate` through the gate and insert it if it passes
    pub fn record(&mut self, candidate: &AlertCandidate, now: Timestamp, snapshot: SensorSnapshot) -> Option<&Alert> {
        if !should_emit_alert(self.alerts.iter(), candidate.label, candidate.severity, now) {
            log_debug!("suppressing duplicate {} alert for {}", candidate.severity, candidate.label);
            return None;
        }

        self.push(candidate.severity, candidate.title(), candidate.message(), now, snapshot);
        self.alerts.front()
    }

    /// Append the ungated system check alert
    ///
    /// `prediction` is `None` before the first evaluation.
    pub fn record_system_check(
        &mut self,
        prediction: Option<&SystemPrediction>,
        now: Timestamp,
        snapshot: SensorSnapshot,
    ) -> u64 {
        let (status, severity, risk) = match prediction {
            Some(prediction) => (
                prediction.health_status.as_str(),
                Severity::for_health(prediction.health_status),
                prediction.failure_risk,
            ),
            None => ("Unknown", Severity::Info, 0),
        };

        self.push(
            severity,
            format!("System Health: {}", status),
            format!("Current health status: {}, Failure risk: {}%", status, risk),
            now,
            snapshot,
        )
    }

    /// Iterate newest first
    pub fn iter(&self) -> impl Iterator<Item = &Alert> + '_ {
        self.alerts.iter()
    }

    /// Alerts of one severity, newest first; `None` yields everything
    pub fn filtered(&self, severity: Option<Severity>) -> impl Iterator<Item = &Alert> + '_ {
        self.alerts
            .iter()
            .filter(move |alert| severity.map_or(true, |wanted| alert.severity == wanted))
    }

    /// Badge number: critical count if any, otherwise the total
    pub fn badge_count(&self) -> usize {
        match self.filtered(Some(Severity::Critical)).count() {
            0 => self.alerts.len(),
            critical => critical,
        }
    }

    /// Most recent alert
    pub fn latest(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    /// Number of stored alerts
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// No alerts stored
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Drop every alert
    pub fn clear(&mut self) {
        self.alerts.clear();
    }

    /// Owned copy, newest first, for persistence
    pub fn to_vec(&self) -> Vec<Alert> {
        self.alerts.iter().cloned().collect()
    }
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {}", self.severity, self.title, self.message)
    }
}
