//! Monitoring session state
//!
//! A [`Monitor`] owns everything one dashboard session mutates between
//! refreshes: the current snapshot, the latest predictions, the alert log and
//! a bounded history of evaluated readings. One [`Monitor::evaluate`] call is
//! one refresh cycle:
//!
//! ```text
//! remote.predict(snapshot) ──ok──▶ prediction (source = Remote)
//!          │
//!         err ──▶ log warning ──▶ predict_system_health (source = Local)
//!
//! classify_snapshot ──▶ history.push ──▶ candidates ──▶ dedup gate ──▶ alert log
//! ```
//!
//! The remote predictor is tried exactly once per cycle. Any failure falls
//! back to the local rules; nothing is retried and nothing is surfaced.

use alloc::collections::VecDeque;

use rand::Rng;
use serde::Serialize;

use crate::alerts::{sensor_alert_candidates, system_alert_candidate, AlertLog};
use crate::classifier::{classify_snapshot, SensorPredictions};
use crate::constants::alerts::MAX_HISTORY;
use crate::errors::ValidationResult;
use crate::predictor::{predict_system_health, LocalPredictor, Predictor, SystemPrediction};
use crate::sensors::SensorSnapshot;
use crate::time::Timestamp;
use crate::validators::SnapshotValidator;

/// Where a system prediction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    /// Answered by the remote prediction service
    Remote,
    /// Computed by the built-in rules
    Local,
}

/// One evaluated reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingRecord {
    /// When the evaluation ran
    pub timestamp: Timestamp,
    /// Input readings
    pub snapshot: SensorSnapshot,
    /// System-level result
    pub prediction: SystemPrediction,
    /// Per-sensor results
    pub sensors: SensorPredictions,
    /// Who produced `prediction`
    pub source: PredictionSource,
}

/// Summary of one refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Who produced the system prediction
    pub source: PredictionSource,
    /// Alerts that passed the dedup gate
    pub alerts_raised: usize,
}

/// Counters shown on the overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonitorStats {
    /// Entries in the reading history
    pub readings_analysed: usize,
    /// History entries flagged as anomalies
    pub anomalies_detected: usize,
    /// Alerts currently in the log
    pub alerts: usize,
}

/// Session state for one monitored machine
#[derive(Debug, Clone)]
pub struct Monitor {
    snapshot: SensorSnapshot,
    validator: SnapshotValidator,
    latest: Option<SystemPrediction>,
    sensors: Option<SensorPredictions>,
    alerts: AlertLog,
    history: VecDeque<ReadingRecord>,
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Monitor {
    /// Start a session at the nominal snapshot
    pub fn new() -> Self {
        Self {
            snapshot: SensorSnapshot::nominal(),
            validator: SnapshotValidator::default(),
            latest: None,
            sensors: None,
            alerts: AlertLog::new(),
            history: VecDeque::new(),
        }
    }

    /// Use a custom validator for [`Monitor::set_snapshot`]
    pub fn with_validator(mut self, validator: SnapshotValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Continue with previously persisted alerts
    pub fn with_alerts(mut self, alerts: AlertLog) -> Self {
        self.alerts = alerts;
        self
    }

    /// Replace the current readings; rejected readings leave the snapshot untouched
    pub fn set_snapshot(&mut self, snapshot: SensorSnapshot) -> ValidationResult<()> {
        self.validator.validate(&snapshot)?;
        self.snapshot = snapshot;
        Ok(())
    }

    /// Restore the nominal readings
    pub fn reset_snapshot(&mut self) {
        self.snapshot = SensorSnapshot::nominal();
    }

    /// Load the anomaly preset
    pub fn simulate_anomaly(&mut self) {
        self.snapshot = SensorSnapshot::anomalous();
    }

    /// Current readings
    pub fn snapshot(&self) -> &SensorSnapshot {
        &self.snapshot
    }

    /// Run one refresh cycle
    ///
    /// `remote` is tried once; on any error the local rules answer instead.
    pub fn evaluate<P, R>(&mut self, remote: Option<&mut P>, now: Timestamp, rng: &mut R) -> Evaluation
    where
        P: Predictor + ?Sized,
        R: Rng + ?Sized,
    {
        let snapshot = self.snapshot;

        let (prediction, source) = match remote.map(|predictor| predictor.predict(&snapshot)) {
            Some(Ok(prediction)) => (prediction, PredictionSource::Remote),
            Some(Err(error)) => {
                log_warn!("remote prediction unavailable, using local rules: {}", error);
                (predict_system_health(&snapshot), PredictionSource::Local)
            }
            None => (predict_system_health(&snapshot), PredictionSource::Local),
        };

        let sensors = classify_snapshot(&snapshot, rng);

        if self.history.len() >= MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(ReadingRecord {
            timestamp: now,
            snapshot,
            prediction: prediction.clone(),
            sensors,
            source,
        });

        let mut alerts_raised = 0;
        let candidates = sensor_alert_candidates(&sensors)
            .into_iter()
            .chain(system_alert_candidate(&prediction));
        for candidate in candidates {
            if self.alerts.record(&candidate, now, snapshot).is_some() {
                alerts_raised += 1;
            }
        }

        log_debug!(
            "evaluated snapshot: {} risk {}% via {:?}, {} new alerts",
            prediction.health_status,
            prediction.failure_risk,
            source,
            alerts_raised
        );

        self.latest = Some(prediction);
        self.sensors = Some(sensors);

        Evaluation { source, alerts_raised }
    }

    /// Run one refresh cycle with the local rules only
    pub fn evaluate_local<R: Rng + ?Sized>(&mut self, now: Timestamp, rng: &mut R) -> Evaluation {
        self.evaluate(None::<&mut LocalPredictor>, now, rng)
    }

    /// Append the ungated system check alert for the latest prediction
    pub fn record_system_check(&mut self, now: Timestamp) {
        self.alerts.record_system_check(self.latest.as_ref(), now, self.snapshot);
    }

    /// Latest system prediction, `None` before the first evaluation
    pub fn latest(&self) -> Option<&SystemPrediction> {
        self.latest.as_ref()
    }

    /// Latest per-sensor predictions
    pub fn sensor_predictions(&self) -> Option<&SensorPredictions> {
        self.sensors.as_ref()
    }

    /// Evaluated readings, oldest first
    pub fn history(&self) -> impl Iterator<Item = &ReadingRecord> + '_ {
        self.history.iter()
    }

    /// Alert log
    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    /// Drop every alert
    pub fn clear_alerts(&mut self) {
        self.alerts.clear();
    }

    /// Overview counters
    pub fn stats(&self) -> MonitorStats {
        MonitorStats {
            readings_analysed: self.history.len(),
            anomalies_detected: self
                .history
                .iter()
                .filter(|record| record.prediction.anomaly_detected)
                .count(),
            alerts: self.alerts.len(),
        }
    }
}
