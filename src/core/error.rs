//! Error types raised by the entity graph

use thiserror::Error;

/// Errors raised by entity constructors and mutation operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A constructor argument failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A grade outside the 1.0 to 5.0 scale was passed to a result recording.
    #[error("grade {0} is outside the valid range 1.0 to 5.0")]
    InvalidGrade(f64),

    /// A pass check was requested before any result was recorded.
    #[error("no result has been recorded for this exam yet")]
    NotGraded,

    /// An attempt was added to a module with no attempts remaining.
    #[error("no exam attempts remaining for module '{0}'")]
    AttemptsExhausted(String),
}

impl DomainError {
    /// Shorthand for a validation failure with an owned message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
