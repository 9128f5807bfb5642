//! Client-side validation errors

use thiserror::Error;

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Raised before any request leaves the process
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("event type '{0}' cannot be sent")]
    UnsupportedEventType(String),

    #[error("initial chat: {0}")]
    InitialChat(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
