//! Dashboard error types

use predix_core::ValidationError;
use thiserror::Error;

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Errors surfaced to the operator
///
/// Input problems abort the operation without touching stored state.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Form or reading rejected; the message is shown as-is
    #[error("{0}")]
    Validation(String),

    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,

    /// Referenced record does not exist
    #[error("{0} not found")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl From<ValidationError> for DashboardError {
    fn from(err: ValidationError) -> Self {
        DashboardError::Validation(err.to_string())
    }
}

/// Key-value store failures
///
/// Undecodable records are not errors; they load as empty collections.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use predix_core::SensorKind;

    #[test]
    fn validation_errors_keep_their_message() {
        let err: DashboardError = ValidationError::InvalidValue {
            sensor: SensorKind::Pressure,
        }
        .into();
        assert_eq!(err.to_string(), "pressure value is not a valid number");
    }

    #[test]
    fn store_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: DashboardError = StoreError::from(io).into();
        assert!(matches!(err, DashboardError::Store(StoreError::Io(_))));
    }
}
