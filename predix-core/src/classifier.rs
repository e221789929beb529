//! Per-sensor classification
//!
//! Places one reading in the optimal, warning or critical band of its
//! sensor. Bands overlap, so the checks run in a fixed precedence order and
//! the first match wins:
//!
//! ```text
//! 1. value >= critical.low                                → critical
//! 2. value in warning band AND outside optimal band       → warning
//! 3. value in optimal band                                → normal
//! 4. anything else (below every band)                     → normal (fallback)
//! ```
//!
//! The fallback keeps readings far below the optimal floor at `normal`.
//! Vibration has no low warning band at all, so a stopped machine reads as
//! normal vibration.

use core::fmt;

use rand::Rng;
use serde::Serialize;

use crate::constants::sensors::{CONFIDENCE_CRITICAL, CONFIDENCE_NORMAL, CONFIDENCE_WARNING};
use crate::rul::sample_remaining_life;
use crate::sensors::{SensorKind, SensorRanges, SensorSnapshot, ROUTINE_RECOMMENDATION};

/// Band a reading fell into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    /// Inside the optimal band, or below every band
    Normal,
    /// In the warning band but outside the optimal band
    Warning,
    /// At or above the critical floor
    Critical,
}

/// Risk attached to a sensor status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Normal readings
    Low,
    /// Warning readings
    Medium,
    /// Critical readings
    High,
}

/// Classification of a single sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorPrediction {
    /// Sensor that was classified
    pub sensor: SensorKind,
    /// Raw reading
    pub value: f32,
    /// Band the reading fell into
    pub status: SensorStatus,
    /// Fixed per status: 0.85 critical, 0.75 warning, 0.95 normal
    pub confidence: f32,
    /// Operator-facing prediction sentence
    pub prediction: &'static str,
    /// Operator-facing recommendation
    pub recommendation: &'static str,
    /// Risk level derived from the status
    pub risk_level: RiskLevel,
    /// Sampled remaining useful life in hours
    #[serde(rename = "rul")]
    pub estimated_remaining_life: u32,
}

/// Classify one reading against `ranges`
///
/// `rng` only feeds the remaining-life estimate; every other field is a pure
/// function of `kind`, `value` and `ranges`.
pub fn classify_sensor<R: Rng + ?Sized>(
    kind: SensorKind,
    value: f32,
    ranges: &SensorRanges,
    rng: &mut R,
) -> SensorPrediction {
    let copy = kind.copy();

    let (status, confidence, prediction, recommendation) = if value >= ranges.critical.low {
        (SensorStatus::Critical, CONFIDENCE_CRITICAL, copy.alert, copy.maintenance)
    } else if ranges.warning.contains(value) && !ranges.optimal.contains(value) {
        (SensorStatus::Warning, CONFIDENCE_WARNING, copy.warning, copy.warning_recommendation)
    } else if ranges.optimal.contains(value) {
        (SensorStatus::Normal, CONFIDENCE_NORMAL, copy.normal, ROUTINE_RECOMMENDATION)
    } else {
        log_debug!("{} reading {} below every band, treating as normal", kind, value);
        (SensorStatus::Normal, CONFIDENCE_NORMAL, copy.system, copy.fallback_recommendation)
    };

    SensorPrediction {
        sensor: kind,
        value,
        status,
        confidence,
        prediction,
        recommendation,
        risk_level: status.risk_level(),
        estimated_remaining_life: sample_remaining_life(status, rng),
    }
}

impl SensorStatus {
    /// Risk level reported alongside this status
    pub const fn risk_level(&self) -> RiskLevel {
        match self {
            SensorStatus::Normal => RiskLevel::Low,
            SensorStatus::Warning => RiskLevel::Medium,
            SensorStatus::Critical => RiskLevel::High,
        }
    }

    /// Whether the status should raise a sensor alert
    pub const fn is_alerting(&self) -> bool {
        !matches!(self, SensorStatus::Normal)
    }

    /// Display name
    pub const fn as_str(&self) -> &'static str {
        match self {
            SensorStatus::Normal => "Normal",
            SensorStatus::Warning => "Warning",
            SensorStatus::Critical => "Critical",
        }
    }
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four independent sub-predictions for one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorPredictions {
    /// Temperature classification
    pub temperature: SensorPrediction,
    /// Vibration classification
    pub vibration: SensorPrediction,
    /// Pressure classification
    pub pressure: SensorPrediction,
    /// RPM classification
    pub rpm: SensorPrediction,
}

impl SensorPredictions {
    /// Prediction for one sensor
    pub fn get(&self, kind: SensorKind) -> &SensorPrediction {
        match kind {
            SensorKind::Temperature => &self.temperature,
            SensorKind::Vibration => &self.vibration,
            SensorKind::Pressure => &self.pressure,
            SensorKind::Rpm => &self.rpm,
        }
    }

    /// Iterate in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = &SensorPrediction> + '_ {
        SensorKind::ALL.into_iter().map(move |kind| self.get(kind))
    }

    /// Worst status across the four sensors
    pub fn worst_status(&self) -> SensorStatus {
        self.iter()
            .map(|prediction| prediction.status)
            .max_by_key(|status| *status as u8)
            .unwrap_or(SensorStatus::Normal)
    }
}

/// Classify every sensor of `snapshot` against its built-in bands
pub fn classify_snapshot<R: Rng + ?Sized>(snapshot: &SensorSnapshot, rng: &mut R) -> SensorPredictions {
    let mut classify = |kind: SensorKind| classify_sensor(kind, snapshot.value(kind), &kind.ranges(), rng);

    SensorPredictions {
        temperature: classify(SensorKind::Temperature),
        vibration: classify(SensorKind::Vibration),
        pressure: classify(SensorKind::Pressure),
        rpm: classify(SensorKind::Rpm),
    }
}
