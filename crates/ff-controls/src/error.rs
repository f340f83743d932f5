//! Error types for compensator operations.

use thiserror::Error;

/// Result type for compensator operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while evaluating or configuring a compensator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Parameters cannot be evaluated; only reconfiguration recovers.
    #[error("Invalid configuration: {what}")]
    InvalidConfiguration { what: &'static str },

    /// Shared compensator state could not be accessed.
    #[error("Compensator state error: {what}")]
    StateError { what: String },
}
