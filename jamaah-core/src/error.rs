//! Error types for jamaah-core.

use thiserror::Error;

/// Errors that can occur at the boundaries of jamaah-core (records, config, input parsing).
///
/// The calendar and bearing math itself never fails.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid schedule '{id}': {reason}")]
    InvalidPolicy { id: String, reason: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid Hijri date '{0}'. Expected DD-MM-YYYY")]
    InvalidHijriLabel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    pub(crate) fn invalid_policy(id: &str, reason: impl Into<String>) -> Self {
        CoreError::InvalidPolicy {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for jamaah-core operations.
pub type CoreResult<T> = Result<T, CoreError>;
