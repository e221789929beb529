//! Monitored sensors, their classification bands and the snapshot type
//!
//! Four sensors are monitored on every machine. Each [`SensorKind`] carries
//! its built-in [`SensorRanges`], absolute input limits and the operator copy
//! shown next to its prediction, so adding a sensor means touching one match
//! per property and nothing else.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::sensors::*;

/// Sensor type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SensorKind {
    /// Bearing/housing temperature in °C
    Temperature = 0,
    /// Vibration velocity in mm/s
    Vibration = 1,
    /// Line pressure in PSI
    Pressure = 2,
    /// Shaft speed in revolutions per minute
    Rpm = 3,
}

impl SensorKind {
    /// All sensors in evaluation order
    pub const ALL: [SensorKind; 4] = [
        SensorKind::Temperature,
        SensorKind::Vibration,
        SensorKind::Pressure,
        SensorKind::Rpm,
    ];

    /// Machine-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "temperature",
            SensorKind::Vibration => "vibration",
            SensorKind::Pressure => "pressure",
            SensorKind::Rpm => "rpm",
        }
    }

    /// Expected unit of measurement
    pub const fn unit(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "°C",
            SensorKind::Vibration => "mm/s",
            SensorKind::Pressure => "PSI",
            SensorKind::Rpm => "RPM",
        }
    }

    /// Label used in alert titles; alert deduplication matches on it
    pub const fn alert_label(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "AI Temperature Analysis",
            SensorKind::Vibration => "AI Vibration Analysis",
            SensorKind::Pressure => "AI Pressure Analysis",
            SensorKind::Rpm => "AI RPM Analysis",
        }
    }

    /// Built-in classification bands
    pub fn ranges(&self) -> SensorRanges {
        match self {
            SensorKind::Temperature => SensorRanges::from_tuples(TEMP_OPTIMAL, TEMP_WARNING, TEMP_CRITICAL),
            SensorKind::Vibration => {
                SensorRanges::from_tuples(VIBRATION_OPTIMAL, VIBRATION_WARNING, VIBRATION_CRITICAL)
            }
            SensorKind::Pressure => {
                SensorRanges::from_tuples(PRESSURE_OPTIMAL, PRESSURE_WARNING, PRESSURE_CRITICAL)
            }
            SensorKind::Rpm => SensorRanges::from_tuples(RPM_OPTIMAL, RPM_WARNING, RPM_CRITICAL),
        }
    }

    /// Absolute limits accepted from operator input
    pub fn limits(&self) -> Range {
        let (low, high) = match self {
            SensorKind::Temperature => TEMP_LIMITS,
            SensorKind::Vibration => VIBRATION_LIMITS,
            SensorKind::Pressure => PRESSURE_LIMITS,
            SensorKind::Rpm => RPM_LIMITS,
        };
        Range::new(low, high)
    }

    /// Operator copy attached to this sensor's predictions
    pub const fn copy(&self) -> &'static SensorCopy {
        match self {
            SensorKind::Temperature => &TEMPERATURE_COPY,
            SensorKind::Vibration => &VIBRATION_COPY,
            SensorKind::Pressure => &PRESSURE_COPY,
            SensorKind::Rpm => &RPM_COPY,
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive numeric interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Lower edge, inclusive
    pub low: f32,
    /// Upper edge, inclusive
    pub high: f32,
}

impl Range {
    /// Create a range; swapped edges are put back in order
    pub fn new(low: f32, high: f32) -> Self {
        if low > high {
            Self { low: high, high: low }
        } else {
            Self { low, high }
        }
    }

    /// Check `low <= value <= high`
    pub fn contains(&self, value: f32) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Optimal, warning and critical bands for one sensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorRanges {
    /// Normal operation
    pub optimal: Range,
    /// Needs attention when outside `optimal`
    pub warning: Range,
    /// Only the lower edge is used: anything at or above it is critical
    pub critical: Range,
}

impl SensorRanges {
    /// Build from `(low, high)` pairs
    pub fn from_tuples(optimal: (f32, f32), warning: (f32, f32), critical: (f32, f32)) -> Self {
        Self {
            optimal: Range::new(optimal.0, optimal.1),
            warning: Range::new(warning.0, warning.1),
            critical: Range::new(critical.0, critical.1),
        }
    }
}

/// Fixed operator copy for one sensor
///
/// Warning and fallback sentences embed the sensor name, so they are spelled
/// out here rather than formatted at classification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorCopy {
    /// Name of the monitoring system, used as the fallback prediction
    pub system: &'static str,
    /// Maintenance action recommended for critical readings
    pub maintenance: &'static str,
    /// Prediction sentence for critical readings
    pub alert: &'static str,
    /// Prediction sentence for in-band readings
    pub normal: &'static str,
    /// Prediction sentence for warning readings
    pub warning: &'static str,
    /// Recommendation for warning readings
    pub warning_recommendation: &'static str,
    /// Recommendation when no band matched
    pub fallback_recommendation: &'static str,
}

/// Recommendation for readings inside the optimal band
pub const ROUTINE_RECOMMENDATION: &str = "Continue routine maintenance schedule.";

const TEMPERATURE_COPY: SensorCopy = SensorCopy {
    system: "Temperature monitoring system",
    maintenance: "Check cooling system and ventilation",
    alert: "Temperature exceeds safe operating limits",
    normal: "Temperature monitoring system operating normally",
    warning: "Temperature levels require attention",
    warning_recommendation: "Monitor temperature closely and consider check cooling system and ventilation",
    fallback_recommendation: "Continue monitoring temperature levels.",
};

const VIBRATION_COPY: SensorCopy = SensorCopy {
    system: "Vibration monitoring system",
    maintenance: "Inspect bearings and mounting components",
    alert: "Excessive vibration detected, potential mechanical failure",
    normal: "Vibration monitoring system operating normally",
    warning: "Vibration levels require attention",
    warning_recommendation: "Monitor vibration closely and consider inspect bearings and mounting components",
    fallback_recommendation: "Continue monitoring vibration levels.",
};

const PRESSURE_COPY: SensorCopy = SensorCopy {
    system: "Pressure monitoring system",
    maintenance: "Check pressure relief valves and pump performance",
    alert: "Pressure levels outside safe operating range",
    normal: "Pressure monitoring system operating normally",
    warning: "Pressure levels require attention",
    warning_recommendation: "Monitor pressure closely and consider check pressure relief valves and pump performance",
    fallback_recommendation: "Continue monitoring pressure levels.",
};

const RPM_COPY: SensorCopy = SensorCopy {
    system: "RPM monitoring system",
    maintenance: "Check motor performance and load conditions",
    alert: "RPM outside optimal operating range",
    normal: "RPM monitoring system operating normally",
    warning: "Rpm levels require attention",
    warning_recommendation: "Monitor rpm closely and consider check motor performance and load conditions",
    fallback_recommendation: "Continue monitoring rpm levels.",
};

/// One synchronous reading of all four sensors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// °C
    pub temperature: f32,
    /// mm/s
    pub vibration: f32,
    /// PSI
    pub pressure: f32,
    /// revolutions per minute
    pub rpm: u32,
}

impl SensorSnapshot {
    /// Create a snapshot from raw readings
    pub const fn new(temperature: f32, vibration: f32, pressure: f32, rpm: u32) -> Self {
        Self {
            temperature,
            vibration,
            pressure,
            rpm,
        }
    }

    /// Readings restored by a sensor reset
    pub const fn nominal() -> Self {
        let (t, v, p, r) = NOMINAL_SNAPSHOT;
        Self::new(t, v, p, r)
    }

    /// Readings loaded by the anomaly simulation
    pub const fn anomalous() -> Self {
        let (t, v, p, r) = ANOMALY_SNAPSHOT;
        Self::new(t, v, p, r)
    }

    /// Reading for one sensor as a float
    pub fn value(&self, kind: SensorKind) -> f32 {
        match kind {
            SensorKind::Temperature => self.temperature,
            SensorKind::Vibration => self.vibration,
            SensorKind::Pressure => self.pressure,
            SensorKind::Rpm => self.rpm as f32,
        }
    }

    /// Iterate `(kind, value)` pairs in evaluation order
    pub fn readings(&self) -> impl Iterator<Item = (SensorKind, f32)> + '_ {
        SensorKind::ALL.into_iter().map(move |kind| (kind, self.value(kind)))
    }
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self::nominal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_edges_are_inclusive() {
        let range = Range::new(40.0, 70.0);
        assert!(range.contains(40.0));
        assert!(range.contains(70.0));
        assert!(!range.contains(70.01));
        assert!(!range.contains(39.99));
    }

    #[test]
    fn swapped_range_is_normalized() {
        let range = Range::new(5.0, 3.0);
        assert_eq!(range.low, 3.0);
        assert_eq!(range.high, 5.0);
    }

    #[test]
    fn built_in_bands() {
        let temp = SensorKind::Temperature.ranges();
        assert_eq!(temp.optimal, Range::new(40.0, 70.0));
        assert_eq!(temp.warning, Range::new(35.0, 75.0));
        assert_eq!(temp.critical, Range::new(75.0, 100.0));

        let rpm = SensorKind::Rpm.ranges();
        assert_eq!(rpm.critical.low, 2300.0);
    }

    #[test]
    fn snapshot_values_in_order() {
        let snapshot = SensorSnapshot::new(72.0, 2.0, 125.0, 2000);
        let values: alloc::vec::Vec<_> = snapshot.readings().collect();

        assert_eq!(values[0], (SensorKind::Temperature, 72.0));
        assert_eq!(values[3], (SensorKind::Rpm, 2000.0));
    }

    #[test]
    fn sensor_names_serialize_lowercase() {
        let json = serde_json::to_string(&SensorKind::Rpm).unwrap();
        assert_eq!(json, "\"rpm\"");
    }
}
