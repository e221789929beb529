//! System-level health prediction
//!
//! The local predictor is the offline answer to "how healthy is this
//! machine". It starts from a perfect score, subtracts one capped penalty per
//! deviating sensor and projects the result:
//!
//! ```text
//! score  = 100 - Σ min(cap, deviation × slope)
//! risk   = round(clamp(100 - score, 0, 100))
//! status = Critical if score < 40, Warning if score < 70, else Healthy
//! rul    = max(50, round(score × 10))
//! ```
//!
//! Sensors are visited in the order temperature, vibration, pressure, rpm.
//! Each breach overwrites the root cause, so the last deviating sensor names
//! the cause. [`root_cause_details`] gives the full breakdown instead: one
//! entry per sensor outside its detail thresholds, each with its own
//! severity.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::classifier::SensorStatus;
use crate::constants::scoring::*;
use crate::sensors::{SensorKind, SensorSnapshot};

/// Overall machine health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Score at or above 70
    Healthy,
    /// Score in [40, 70)
    Warning,
    /// Score below 40
    Critical,
}

impl HealthStatus {
    /// Status for a raw health score
    pub fn from_score(score: f32) -> Self {
        if score < CRITICAL_SCORE_THRESHOLD {
            HealthStatus::Critical
        } else if score < WARNING_SCORE_THRESHOLD {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }

    /// Display name
    pub const fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Warning => "Warning",
            HealthStatus::Critical => "Critical",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root cause and recommendation for one deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootCause {
    /// Short description of the dominant deviation
    pub cause: &'static str,
    /// What to do about it
    pub recommendation: &'static str,
}

impl RootCause {
    const fn new(cause: &'static str, recommendation: &'static str) -> Self {
        Self { cause, recommendation }
    }
}

const NORMAL_OPERATION: RootCause =
    RootCause::new("Normal operation", "Continue normal operation. Schedule routine maintenance.");
const HIGH_TEMPERATURE: RootCause =
    RootCause::new("High temperature detected", "Check cooling system and ventilation.");
const LOW_TEMPERATURE: RootCause = RootCause::new("Low temperature detected", "Check heating system.");
const HIGH_VIBRATION: RootCause = RootCause::new("High vibration levels", "Inspect bearings and mounting.");
const HIGH_PRESSURE: RootCause = RootCause::new("High pressure detected", "Check pressure relief valves.");
const LOW_PRESSURE: RootCause = RootCause::new("Low pressure detected", "Check pump performance.");
const HIGH_RPM: RootCause = RootCause::new("High RPM detected", "Reduce load or check governor.");
const LOW_RPM: RootCause = RootCause::new("Low RPM detected", "Check power supply and load.");

/// Raw health score before projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthScore {
    /// Score, nominally 0-100; low pressure can push it above 100
    pub value: f32,
    /// Cause attributed to the last deviating sensor
    pub root_cause: RootCause,
}

/// Compute the raw health score for a snapshot
pub fn health_score(snapshot: &SensorSnapshot) -> HealthScore {
    let mut value = INITIAL_HEALTH_SCORE;
    let mut root_cause = NORMAL_OPERATION;

    let mut apply = |penalty: f32, cause: RootCause| {
        value -= penalty;
        root_cause = cause;
    };

    let temperature = snapshot.temperature;
    if temperature > TEMP_HIGH_CUTOFF {
        apply(capped((temperature - TEMP_HIGH_CUTOFF) * TEMP_HIGH_SLOPE, TEMP_HIGH_CAP), HIGH_TEMPERATURE);
    } else if temperature < TEMP_LOW_CUTOFF {
        apply(capped((TEMP_LOW_CUTOFF - temperature) * TEMP_LOW_SLOPE, TEMP_LOW_CAP), LOW_TEMPERATURE);
    }

    let vibration = snapshot.vibration;
    if vibration > VIBRATION_HIGH_CUTOFF {
        apply(
            capped((vibration - VIBRATION_HIGH_CUTOFF) * VIBRATION_HIGH_SLOPE, VIBRATION_HIGH_CAP),
            HIGH_VIBRATION,
        );
    }

    let pressure = snapshot.pressure;
    if pressure > PRESSURE_HIGH_CUTOFF {
        apply(
            capped((pressure - PRESSURE_HIGH_CUTOFF) * PRESSURE_HIGH_SLOPE, PRESSURE_HIGH_CAP),
            HIGH_PRESSURE,
        );
    } else if pressure < PRESSURE_LOW_CUTOFF {
        // Negative penalty: low pressure raises the score
        apply(
            capped((pressure - PRESSURE_LOW_CUTOFF) * PRESSURE_LOW_SLOPE, PRESSURE_LOW_CAP),
            LOW_PRESSURE,
        );
    }

    let rpm = snapshot.rpm as f32;
    if rpm > RPM_HIGH_CUTOFF {
        apply(capped((rpm - RPM_HIGH_CUTOFF) * RPM_HIGH_SLOPE, RPM_HIGH_CAP), HIGH_RPM);
    } else if rpm < RPM_LOW_CUTOFF {
        apply(capped((RPM_LOW_CUTOFF - rpm) * RPM_LOW_SLOPE, RPM_LOW_CAP), LOW_RPM);
    }

    HealthScore { value, root_cause }
}

#[inline]
fn capped(penalty: f32, cap: f32) -> f32 {
    if penalty > cap {
        cap
    } else {
        penalty
    }
}

/// One contributing cause in a root cause breakdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CauseDetail {
    /// Offending sensor, `None` for the all-clear entry
    pub sensor: Option<SensorKind>,
    /// Critical or Warning for a sensor cause, Normal for the all-clear entry
    pub severity: SensorStatus,
    /// Which threshold was crossed, e.g. "Above normal range >75°C"
    pub condition: &'static str,
    /// What is going on
    pub cause: &'static str,
    /// Consequence if left alone
    pub impact: &'static str,
    /// What to do about it
    pub recommendation: &'static str,
}

impl CauseDetail {
    const fn sensor(
        kind: SensorKind,
        severity: SensorStatus,
        condition: &'static str,
        cause: &'static str,
        impact: &'static str,
        recommendation: &'static str,
    ) -> Self {
        Self {
            sensor: Some(kind),
            severity,
            condition,
            cause,
            impact,
            recommendation,
        }
    }
}

const ALL_CLEAR: CauseDetail = CauseDetail {
    sensor: None,
    severity: SensorStatus::Normal,
    condition: "All sensors operating within normal parameters",
    cause: "All monitored systems (Temperature, Pressure, Vibration, RPM) are functioning optimally.",
    impact: "None",
    recommendation: "Continue normal operation with routine maintenance schedule.",
};

/// Break a snapshot down into every contributing cause
///
/// Sensors are checked in the order temperature, pressure, vibration, rpm
/// and each contributes at most one entry. When nothing crosses a threshold
/// the result is a single Normal entry. NaN readings never cross one.
pub fn root_cause_details(snapshot: &SensorSnapshot) -> Vec<CauseDetail> {
    use SensorKind::{Pressure, Rpm, Temperature, Vibration};
    use SensorStatus::{Critical, Warning};

    let mut details = Vec::new();

    let temperature = snapshot.temperature;
    if temperature > DETAIL_TEMP_CRITICAL {
        details.push(CauseDetail::sensor(
            Temperature,
            Critical,
            "Above normal range >75°C",
            "High temperature detected in the system",
            "Can cause component failure and reduced equipment life",
            "Check cooling system immediately",
        ));
    } else if temperature > DETAIL_TEMP_HIGH {
        details.push(CauseDetail::sensor(
            Temperature,
            Warning,
            "Elevated >70°C",
            "Temperature rising above optimal range",
            "Monitor closely to prevent escalation",
            "Monitor cooling system and ventilation",
        ));
    } else if temperature < DETAIL_TEMP_LOW {
        details.push(CauseDetail::sensor(
            Temperature,
            Warning,
            "Below normal <35°C",
            "Low temperature detected",
            "Can affect system performance and efficiency",
            "Check heating system",
        ));
    }

    let pressure = snapshot.pressure;
    if pressure > DETAIL_PRESSURE_CRITICAL {
        details.push(CauseDetail::sensor(
            Pressure,
            Critical,
            "Dangerously high >170 PSI",
            "Critical pressure level detected",
            "Immediate safety risk and equipment damage",
            "Check pressure relief valves immediately",
        ));
    } else if pressure > DETAIL_PRESSURE_HIGH {
        details.push(CauseDetail::sensor(
            Pressure,
            Warning,
            "High >150 PSI",
            "Pressure rising above optimal range",
            "Monitor to prevent system overload",
            "Monitor pressure systems closely",
        ));
    } else if pressure < DETAIL_PRESSURE_LOW {
        details.push(CauseDetail::sensor(
            Pressure,
            Warning,
            "Low <90 PSI",
            "Pressure below optimal range",
            "Can affect system performance and efficiency",
            "Check pump performance",
        ));
    }

    let vibration = snapshot.vibration;
    if vibration > DETAIL_VIBRATION_CRITICAL {
        details.push(CauseDetail::sensor(
            Vibration,
            Critical,
            "Excessive >7 mm/s",
            "Excessive vibration levels detected",
            "Indicates severe mechanical issues or misalignment",
            "Inspect bearings and mounting urgently",
        ));
    } else if vibration > DETAIL_VIBRATION_HIGH {
        details.push(CauseDetail::sensor(
            Vibration,
            Warning,
            "High >5 mm/s",
            "Elevated vibration levels",
            "Early sign of potential bearing or mounting issues",
            "Schedule bearing inspection",
        ));
    }

    let rpm = snapshot.rpm;
    if rpm > DETAIL_RPM_CRITICAL {
        details.push(CauseDetail::sensor(
            Rpm,
            Critical,
            "Excessive >2400 RPM",
            "RPM significantly above normal range",
            "High stress on components, potential for failure",
            "Reduce load or check governor",
        ));
    } else if rpm > DETAIL_RPM_HIGH {
        details.push(CauseDetail::sensor(
            Rpm,
            Warning,
            "High >2200 RPM",
            "RPM above optimal operating range",
            "Increased wear and energy consumption",
            "Monitor engine load and performance",
        ));
    } else if rpm < DETAIL_RPM_LOW {
        details.push(CauseDetail::sensor(
            Rpm,
            Warning,
            "Low <1700 RPM",
            "RPM below optimal operating range",
            "Reduced performance and efficiency",
            "Check power supply and load conditions",
        ));
    }

    if details.is_empty() {
        return vec![ALL_CLEAR];
    }
    details
}

/// Structured system-level prediction
///
/// Field names match the JSON returned by the remote prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemPrediction {
    /// Overall status
    pub health_status: HealthStatus,
    /// Failure risk in percent, 0-100
    pub failure_risk: u8,
    /// Remaining useful life in hours, at least 50 for local predictions
    pub remaining_useful_life: u32,
    /// Risk above 20 %
    pub anomaly_detected: bool,
    /// Unrounded risk as a fraction, 0-1
    pub anomaly_probability: f32,
    /// Dominant deviation
    pub root_cause: String,
    /// Suggested action
    pub recommendation: String,
    /// Confidence in [0.1, 1]
    pub confidence: f32,
}

impl SystemPrediction {
    /// Project a raw score into a prediction
    pub fn from_score(score: &HealthScore) -> Self {
        let risk = clamp(INITIAL_HEALTH_SCORE - score.value, 0.0, 100.0);
        let rul = libm::roundf(score.value * RUL_HOURS_PER_SCORE_POINT);

        Self {
            health_status: HealthStatus::from_score(score.value),
            failure_risk: libm::roundf(risk) as u8,
            remaining_useful_life: (rul.max(0.0) as u32).max(MIN_SYSTEM_RUL_HOURS),
            anomaly_detected: risk > ANOMALY_RISK_THRESHOLD,
            anomaly_probability: risk / 100.0,
            root_cause: score.root_cause.cause.to_string(),
            recommendation: score.root_cause.recommendation.to_string(),
            confidence: clamp(score.value / 100.0, MIN_SYSTEM_CONFIDENCE, 1.0),
        }
    }
}

#[inline]
fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Predict system health locally
///
/// Pure function of the snapshot: repeated calls return equal predictions.
pub fn predict_system_health(snapshot: &SensorSnapshot) -> SystemPrediction {
    SystemPrediction::from_score(&health_score(snapshot))
}

/// Anything that can turn a snapshot into a system prediction
pub trait Predictor {
    /// Failure reported when no prediction could be produced
    type Error: fmt::Display;

    /// Produce a prediction for one snapshot
    fn predict(&mut self, snapshot: &SensorSnapshot) -> Result<SystemPrediction, Self::Error>;
}

/// The built-in rule-based predictor; never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPredictor;

impl Predictor for LocalPredictor {
    type Error = Infallible;

    fn predict(&mut self, snapshot: &SensorSnapshot) -> Result<SystemPrediction, Self::Error> {
        Ok(predict_system_health(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anomaly_scenario_is_critical() {
        let score = health_score(&SensorSnapshot::anomalous());
        // 30 + 17.5 + 6 + 10
        assert!((score.value - 36.5).abs() < 1e-4);

        let prediction = predict_system_health(&SensorSnapshot::anomalous());
        assert_eq!(prediction.health_status, HealthStatus::Critical);
        assert_eq!(prediction.failure_risk, 64);
        assert!(prediction.failure_risk > 60);
        assert!(prediction.anomaly_detected);
        assert!((prediction.anomaly_probability - 0.635).abs() < 1e-4);
        assert_eq!(prediction.remaining_useful_life, 365);
        // RPM is visited last and wins
        assert_eq!(prediction.root_cause, "High RPM detected");
        assert_eq!(prediction.recommendation, "Reduce load or check governor.");
        assert!((prediction.confidence - 0.365).abs() < 1e-4);
    }

    #[test]
    fn nominal_scenario_is_healthy() {
        let prediction = predict_system_health(&SensorSnapshot::nominal());
        assert_eq!(prediction.health_status, HealthStatus::Healthy);
        assert_eq!(prediction.failure_risk, 0);
        assert!(!prediction.anomaly_detected);
        assert_eq!(prediction.anomaly_probability, 0.0);
        assert_eq!(prediction.remaining_useful_life, 1000);
        assert_eq!(prediction.root_cause, "Normal operation");
        assert_eq!(prediction.confidence, 1.0);
    }

    #[test]
    fn penalties_are_capped() {
        let score = health_score(&SensorSnapshot::new(200.0, 2.5, 125.0, 2000));
        assert_eq!(score.value, 70.0);
        assert_eq!(score.root_cause, HIGH_TEMPERATURE);
        assert_eq!(HealthStatus::from_score(score.value), HealthStatus::Healthy);
    }

    #[test]
    fn low_pressure_raises_score() {
        let score = health_score(&SensorSnapshot::new(50.0, 2.5, 50.0, 2000));
        // (50 - 100) × 0.3 = -15
        assert_eq!(score.value, 115.0);
        assert_eq!(score.root_cause, LOW_PRESSURE);

        let prediction = SystemPrediction::from_score(&score);
        assert_eq!(prediction.failure_risk, 0);
        assert_eq!(prediction.confidence, 1.0);
        assert_eq!(prediction.remaining_useful_life, 1150);
        assert_eq!(prediction.health_status, HealthStatus::Healthy);
    }

    #[test]
    fn status_thresholds() {
        assert_eq!(HealthStatus::from_score(70.0), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from_score(69.9), HealthStatus::Warning);
        assert_eq!(HealthStatus::from_score(40.0), HealthStatus::Warning);
        assert_eq!(HealthStatus::from_score(39.9), HealthStatus::Critical);
    }

    #[test]
    fn low_rpm_and_low_temperature() {
        let score = health_score(&SensorSnapshot::new(30.0, 1.0, 125.0, 1000));
        // 10 + min(15, 16)
        assert_eq!(score.value, 75.0);
        assert_eq!(score.root_cause, LOW_RPM);
    }

    #[test]
    fn anomaly_flag_uses_unrounded_risk() {
        // Risk 19.8 rounds to 20 but stays below the anomaly threshold
        let prediction = predict_system_health(&SensorSnapshot::new(79.9, 2.5, 125.0, 2000));
        assert_eq!(prediction.failure_risk, 20);
        assert!(!prediction.anomaly_detected);
    }

    #[test]
    fn local_predictor_is_idempotent() {
        let mut predictor = LocalPredictor;
        let snapshot = SensorSnapshot::new(72.0, 6.0, 155.0, 2100);
        let first = predictor.predict(&snapshot);
        let second = predictor.predict(&snapshot);
        assert_eq!(first, second);
    }

    fn severities(snapshot: SensorSnapshot) -> Vec<(Option<SensorKind>, SensorStatus)> {
        root_cause_details(&snapshot)
            .iter()
            .map(|detail| (detail.sensor, detail.severity))
            .collect()
    }

    #[test]
    fn nominal_details_are_all_clear() {
        let details = root_cause_details(&SensorSnapshot::nominal());
        assert_eq!(details, [ALL_CLEAR]);
        assert_eq!(details[0].severity, SensorStatus::Normal);
        assert_eq!(details[0].sensor, None);

        // Detail thresholds are strict and wider than the optimal bands
        assert_eq!(
            severities(SensorSnapshot::new(70.0, 5.0, 150.0, 2200)),
            [(None, SensorStatus::Normal)]
        );
        assert_eq!(
            severities(SensorSnapshot::new(35.0, 0.0, 90.0, 1700)),
            [(None, SensorStatus::Normal)]
        );
    }

    #[test]
    fn anomaly_lists_every_sensor_in_order() {
        let details = root_cause_details(&SensorSnapshot::anomalous());
        let sensors: Vec<_> = details.iter().map(|d| d.sensor).collect();
        assert_eq!(
            sensors,
            [
                Some(SensorKind::Temperature),
                Some(SensorKind::Pressure),
                Some(SensorKind::Vibration),
                Some(SensorKind::Rpm),
            ]
        );
        assert!(details.iter().all(|d| d.severity == SensorStatus::Critical));
        assert_eq!(details[3].recommendation, "Reduce load or check governor");
    }

    #[test]
    fn temperature_detail_thresholds() {
        let at = |t: f32| severities(SensorSnapshot::new(t, 2.5, 125.0, 2000));
        assert_eq!(at(75.1), [(Some(SensorKind::Temperature), SensorStatus::Critical)]);
        assert_eq!(at(75.0), [(Some(SensorKind::Temperature), SensorStatus::Warning)]);
        assert_eq!(at(70.1), [(Some(SensorKind::Temperature), SensorStatus::Warning)]);
        assert_eq!(at(70.0), [(None, SensorStatus::Normal)]);
        assert_eq!(at(35.0), [(None, SensorStatus::Normal)]);
        assert_eq!(at(34.9), [(Some(SensorKind::Temperature), SensorStatus::Warning)]);
        assert_eq!(
            root_cause_details(&SensorSnapshot::new(20.0, 2.5, 125.0, 2000))[0].cause,
            "Low temperature detected"
        );
    }

    #[test]
    fn pressure_detail_thresholds() {
        let at = |p: f32| severities(SensorSnapshot::new(55.0, 2.5, p, 2000));
        assert_eq!(at(170.1), [(Some(SensorKind::Pressure), SensorStatus::Critical)]);
        assert_eq!(at(170.0), [(Some(SensorKind::Pressure), SensorStatus::Warning)]);
        assert_eq!(at(150.1), [(Some(SensorKind::Pressure), SensorStatus::Warning)]);
        assert_eq!(at(150.0), [(None, SensorStatus::Normal)]);
        assert_eq!(at(90.0), [(None, SensorStatus::Normal)]);
        assert_eq!(at(89.9), [(Some(SensorKind::Pressure), SensorStatus::Warning)]);
        assert_eq!(
            root_cause_details(&SensorSnapshot::new(55.0, 2.5, 60.0, 2000))[0].recommendation,
            "Check pump performance"
        );
    }

    #[test]
    fn vibration_detail_thresholds() {
        let at = |v: f32| severities(SensorSnapshot::new(55.0, v, 125.0, 2000));
        assert_eq!(at(7.1), [(Some(SensorKind::Vibration), SensorStatus::Critical)]);
        assert_eq!(at(7.0), [(Some(SensorKind::Vibration), SensorStatus::Warning)]);
        assert_eq!(at(5.1), [(Some(SensorKind::Vibration), SensorStatus::Warning)]);
        assert_eq!(at(5.0), [(None, SensorStatus::Normal)]);
        // No low vibration cause
        assert_eq!(at(0.0), [(None, SensorStatus::Normal)]);
    }

    #[test]
    fn rpm_detail_thresholds() {
        let at = |r: u32| severities(SensorSnapshot::new(55.0, 2.5, 125.0, r));
        assert_eq!(at(2401), [(Some(SensorKind::Rpm), SensorStatus::Critical)]);
        assert_eq!(at(2400), [(Some(SensorKind::Rpm), SensorStatus::Warning)]);
        assert_eq!(at(2201), [(Some(SensorKind::Rpm), SensorStatus::Warning)]);
        assert_eq!(at(2200), [(None, SensorStatus::Normal)]);
        assert_eq!(at(1700), [(None, SensorStatus::Normal)]);
        assert_eq!(at(1699), [(Some(SensorKind::Rpm), SensorStatus::Warning)]);
    }

    #[test]
    fn nan_readings_cross_no_detail_threshold() {
        let snapshot = SensorSnapshot::new(f32::NAN, f32::NAN, f32::NAN, 2000);
        assert_eq!(root_cause_details(&snapshot), [ALL_CLEAR]);
    }

    #[test]
    fn wire_names_are_snake_case() {
        let json = serde_json::to_value(predict_system_health(&SensorSnapshot::nominal())).unwrap();
        assert_eq!(json["health_status"], "Healthy");
        assert_eq!(json["failure_risk"], 0);
        assert!(json.get("remaining_useful_life").is_some());
    }
}
