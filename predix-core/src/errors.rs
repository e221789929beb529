//! Error types for rejected sensor readings
//!
//! Scoring never fails: any finite or non-finite value produces a prediction.
//! Errors only come from [`SnapshotValidator`](crate::SnapshotValidator), which
//! guards the points where readings enter the system from outside (operator
//! input, decoded payloads).
//!
//! Errors are kept small and `Copy` so they can be returned from hot paths and
//! stored without allocation:
//!
//! ```text
//! ValidationError size = 16 bytes
//! ├── Discriminant + SensorKind: 2 bytes
//! ├── Largest variant (OutOfRange): 12 bytes
//! └── Padding: 2 bytes
//! ```
//!
//! ```rust
//! use predix_core::{SensorSnapshot, SnapshotValidator, ValidationError};
//!
//! let validator = SnapshotValidator::default();
//! let reading = SensorSnapshot::new(250.0, 2.5, 125.0, 2000);
//!
//! match validator.validate(&reading) {
//!     Ok(()) => {}
//!     Err(ValidationError::OutOfRange { sensor, .. }) => {
//!         // Reject the slider value and keep the previous snapshot
//!         assert_eq!(sensor.name(), "temperature");
//!     }
//!     Err(ValidationError::InvalidValue { .. }) => {}
//! }
//! ```

use thiserror_no_std::Error;

use crate::sensors::SensorKind;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Value outside the absolute limits accepted for the sensor
    #[error("{sensor} value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// Sensor that produced the reading
        sensor: SensorKind,
        /// The rejected reading
        value: f32,
        /// Lowest accepted value
        min: f32,
        /// Highest accepted value
        max: f32,
    },

    /// Value makes no physical sense (NaN, infinity)
    #[error("{sensor} value is not a valid number")]
    InvalidValue {
        /// Sensor that produced the reading
        sensor: SensorKind,
    },
}

impl ValidationError {
    /// Sensor the error refers to
    pub fn sensor(&self) -> SensorKind {
        match self {
            Self::OutOfRange { sensor, .. } | Self::InvalidValue { sensor } => *sensor,
        }
    }
}
