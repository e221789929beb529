//! Input validation for sensor snapshots
//!
//! Scoring accepts any number, but readings typed in by an operator or
//! decoded from an untrusted payload are checked against absolute limits
//! first:
//!
//! | sensor | accepted |
//! |---|---|
//! | temperature | 0 - 200 °C |
//! | vibration | 0 - 20 mm/s |
//! | pressure | 0 - 500 PSI |
//! | rpm | 0 - 5000 |
//!
//! Non-finite values are rejected before the range check.

use crate::errors::{ValidationError, ValidationResult};
use crate::sensors::{Range, SensorKind, SensorSnapshot};

/// Check if a value is within the specified range
pub fn check_range(sensor: SensorKind, value: f32, limits: Range) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue { sensor });
    }

    if limits.contains(value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            sensor,
            value,
            min: limits.low,
            max: limits.high,
        })
    }
}

/// Validates snapshots against per-sensor absolute limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotValidator {
    temperature: Range,
    vibration: Range,
    pressure: Range,
    rpm: Range,
}

impl Default for SnapshotValidator {
    fn default() -> Self {
        Self {
            temperature: SensorKind::Temperature.limits(),
            vibration: SensorKind::Vibration.limits(),
            pressure: SensorKind::Pressure.limits(),
            rpm: SensorKind::Rpm.limits(),
        }
    }
}

impl SnapshotValidator {
    /// Override the limits for one sensor
    pub fn with_limits(mut self, sensor: SensorKind, limits: Range) -> Self {
        *self.limits_mut(sensor) = limits;
        self
    }

    /// Limits in effect for one sensor
    pub fn limits(&self, sensor: SensorKind) -> Range {
        match sensor {
            SensorKind::Temperature => self.temperature,
            SensorKind::Vibration => self.vibration,
            SensorKind::Pressure => self.pressure,
            SensorKind::Rpm => self.rpm,
        }
    }

    fn limits_mut(&mut self, sensor: SensorKind) -> &mut Range {
        match sensor {
            SensorKind::Temperature => &mut self.temperature,
            SensorKind::Vibration => &mut self.vibration,
            SensorKind::Pressure => &mut self.pressure,
            SensorKind::Rpm => &mut self.rpm,
        }
    }

    /// Validate a single reading
    pub fn validate_reading(&self, sensor: SensorKind, value: f32) -> ValidationResult<()> {
        check_range(sensor, value, self.limits(sensor))
    }

    /// Validate every reading; the first failure in evaluation order is returned
    pub fn validate(&self, snapshot: &SensorSnapshot) -> ValidationResult<()> {
        snapshot
            .readings()
            .try_for_each(|(sensor, value)| self.validate_reading(sensor, value))
    }
}
