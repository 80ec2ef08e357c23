//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Network or HTTP failure talking to an upstream service
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Upstream answered with an unexpected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Required input missing or malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Valid request, empty result
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Local persistence failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ExternalService(_) | Self::InvalidResponse(_)
        )
    }

    /// Message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(e) => e.to_string(),
            Self::ExternalService(_) => {
                "Weather service is unreachable right now. Please try again.".to_string()
            },
            Self::InvalidResponse(_) => {
                "Weather service returned unexpected data. Please try again.".to_string()
            },
            Self::InvalidInput(msg) | Self::NotFound(msg) => msg.clone(),
            Self::RateLimited => "Too many requests. Please wait a moment.".to_string(),
            Self::Storage(_) | Self::Configuration(_) | Self::Internal(_) => {
                "Something went wrong.".to_string()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::ValidationError("bad".into()).into();
        assert_eq!(err.to_string(), "Validation failed: bad");
        assert!(!err.is_retryable());
    }

    #[test]
    fn network_failures_are_retryable() {
        assert!(ApplicationError::ExternalService("timeout".into()).is_retryable());
        assert!(ApplicationError::RateLimited.is_retryable());
        assert!(ApplicationError::InvalidResponse("shape".into()).is_retryable());
    }

    #[test]
    fn input_and_lookup_errors_are_final() {
        assert!(!ApplicationError::InvalidInput("lat".into()).is_retryable());
        assert!(!ApplicationError::NotFound("x".into()).is_retryable());
        assert!(!ApplicationError::Storage("disk".into()).is_retryable());
    }

    #[test]
    fn user_message_hides_internals() {
        let err = ApplicationError::ExternalService("connection refused at 10.0.0.1".into());
        assert!(!err.user_message().contains("10.0.0.1"));
        let err = ApplicationError::Internal("lock poisoned".into());
        assert_eq!(err.user_message(), "Something went wrong.");
    }

    #[test]
    fn user_message_keeps_input_details() {
        let err = ApplicationError::NotFound("No search result found".into());
        assert_eq!(err.user_message(), "No search result found");
    }
}
