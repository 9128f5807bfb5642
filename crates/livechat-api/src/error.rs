//! Error types for the API clients

use livechat_objects::ValidationError;
use thiserror::Error;

use crate::client::ApiFamily;

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur when calling the LiveChat APIs
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure: connection, timeout or body read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a structured error
    #[error("API error: {kind} - {message}")]
    Api { kind: String, message: String },

    /// The API answered with an error body that is not the documented shape
    #[error("couldn't decode error response (code: {status}, raw body: {body})")]
    UnparsableError { status: u16, body: String },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The token source had nothing to offer
    #[error("couldn't get token")]
    NoToken,

    /// The token cannot be used against this API
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("file upload is not supported by the {0} API")]
    UnsupportedFileUpload(ApiFamily),

    /// Invalid client construction
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request rejected locally, nothing was sent
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::UnparsableError { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Error type reported by the API, e.g. `validation` or `not_found`
    pub fn api_error_type(&self) -> Option<&str> {
        match self {
            ApiError::Api { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Whether the request never left the process
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ApiError::NoToken
                | ApiError::InvalidToken(_)
                | ApiError::UnsupportedFileUpload(_)
                | ApiError::Config(_)
                | ApiError::Validation(_)
        )
    }
}
