//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Unknown unit code
    #[error("Invalid {kind} unit: {value}")]
    InvalidUnit { kind: &'static str, value: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid unit error
    pub fn invalid_unit(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidUnit {
            kind,
            value: value.into(),
        }
    }
}
