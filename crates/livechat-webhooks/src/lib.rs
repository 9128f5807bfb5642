//! Webhooks of the LiveChat platform
//!
//! This crate decodes and dispatches inbound webhooks:
//! - the envelope shared by every action
//! - one typed payload per action
//! - per-action handlers with an optional secret key check
//! - an axum router serving the endpoint
//!
//! # Example
//!
//! ```rust,no_run
//! use livechat_webhooks::{webhook_router, Action, Configuration, HandlerError, Payload};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Configuration::new().with_action(
//!         Action::FollowUpRequested,
//!         |license_id: i64, payload: Payload| async move {
//!             if let Payload::FollowUpRequested(follow_up) = payload {
//!                 println!("{license_id}: follow up {}", follow_up.customer_id);
//!             }
//!             Ok::<(), HandlerError>(())
//!         },
//!         Some("webhook-secret".to_string()),
//!     );
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, webhook_router("/webhooks", config)).await?;
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod dispatch;
pub mod payloads;

pub use action::{Action, UnknownAction};
pub use dispatch::{webhook_router, Configuration, ErrorHandler, Webhook, WebhookHandler};
pub use payloads::*;

use axum::http::StatusCode;
use thiserror::Error;

/// Error returned by webhook handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Webhook errors
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("couldn't parse webhook: {0}")]
    InvalidEnvelope(#[source] serde_json::Error),

    #[error("no handler registered for action '{0}'")]
    UnknownAction(String),

    #[error("invalid secret key for action '{0}'")]
    SecretMismatch(Action),

    #[error("couldn't decode payload of action '{action}': {source}")]
    PayloadDecode {
        action: Action,
        #[source]
        source: serde_json::Error,
    },

    #[error("handler for action '{action}' failed: {message}")]
    Handler { action: Action, message: String },
}

impl WebhookError {
    /// Status code answered to the webhook sender
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidEnvelope(_)
            | WebhookError::UnknownAction(_)
            | WebhookError::SecretMismatch(_) => StatusCode::BAD_REQUEST,
            WebhookError::PayloadDecode { .. } | WebhookError::Handler { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, WebhookError>;
