//! Inbound webhook handling
//!
//! One POST endpoint receives every action. The envelope names the action,
//! which selects the registered handler and the payload type.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::action::Action;
use crate::payloads::Payload;
use crate::{HandlerError, Result, WebhookError};

/// Envelope shared by every webhook
#[derive(Debug, Clone, Deserialize)]
pub struct Webhook {
    pub webhook_id: String,
    #[serde(default)]
    pub secret_key: String,
    pub action: String,
    pub license_id: i64,
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub additional_data: Value,
}

/// Receives the decoded payload of the actions it is registered for
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    async fn handle(
        &self,
        license_id: i64,
        payload: Payload,
    ) -> std::result::Result<(), HandlerError>;
}

#[async_trait]
impl<F, Fut> WebhookHandler for F
where
    F: Fn(i64, Payload) -> Fut + Send + Sync,
    Fut: Future<Output = std::result::Result<(), HandlerError>> + Send + 'static,
{
    async fn handle(
        &self,
        license_id: i64,
        payload: Payload,
    ) -> std::result::Result<(), HandlerError> {
        (self)(license_id, payload).await
    }
}

/// Builds the error response from the message and the default status
pub type ErrorHandler = dyn Fn(&str, StatusCode) -> Response + Send + Sync;

struct Registration {
    handler: Arc<dyn WebhookHandler>,
    secret: Option<String>,
}

/// Handlers, secrets and error hook of a webhook endpoint
#[derive(Default)]
pub struct Configuration {
    actions: HashMap<Action, Registration>,
    error_handler: Option<Arc<ErrorHandler>>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `action`. With a non-empty `secret`, webhooks
    /// whose `secret_key` differs are rejected.
    pub fn with_action(
        mut self,
        action: Action,
        handler: impl WebhookHandler + 'static,
        secret: Option<String>,
    ) -> Self {
        self.register(action, Arc::new(handler), secret);
        self
    }

    /// Register one handler instance for several actions
    pub fn register(
        &mut self,
        action: Action,
        handler: Arc<dyn WebhookHandler>,
        secret: Option<String>,
    ) {
        let secured = secret.as_deref().is_some_and(|s| !s.is_empty());
        info!(%action, secured, "Registering webhook handler");
        self.actions.insert(action, Registration { handler, secret });
    }

    /// Replace the default `status + plain-text message` error response
    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, StatusCode) -> Response + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.keys().copied()
    }

    /// Run one raw webhook body through parsing, secret check, payload
    /// decoding and the registered handler
    pub async fn dispatch(&self, body: &[u8]) -> Result<()> {
        let webhook: Webhook = serde_json::from_slice(body).map_err(WebhookError::InvalidEnvelope)?;

        let registration = webhook
            .action
            .parse::<Action>()
            .ok()
            .and_then(|action| self.actions.get(&action).map(|r| (action, r)));
        let Some((action, registration)) = registration else {
            return Err(WebhookError::UnknownAction(webhook.action));
        };

        if let Some(secret) = registration.secret.as_deref().filter(|s| !s.is_empty()) {
            if webhook.secret_key != secret {
                return Err(WebhookError::SecretMismatch(action));
            }
        }

        debug!(
            webhook_id = %webhook.webhook_id,
            %action,
            license_id = webhook.license_id,
            "Decoding webhook payload"
        );

        let payload = Payload::decode(action, webhook.payload)
            .map_err(|source| WebhookError::PayloadDecode { action, source })?;

        registration
            .handler
            .handle(webhook.license_id, payload)
            .await
            .map_err(|e| WebhookError::Handler {
                action,
                message: e.to_string(),
            })
    }

    fn error_response(&self, err: &WebhookError) -> Response {
        let status = err.status_code();
        let message = err.to_string();
        match &self.error_handler {
            Some(handler) => handler(&message, status),
            None => (status, message).into_response(),
        }
    }
}

/// Create Axum router serving the webhook endpoint at `path`
pub fn webhook_router(path: &str, config: Configuration) -> Router {
    Router::new()
        .route(path, post(handle_webhook))
        .with_state(Arc::new(config))
}

/// Handle incoming webhook request
async fn handle_webhook(State(config): State<Arc<Configuration>>, body: Bytes) -> Response {
    match config.dispatch(&body).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            if e.status_code().is_server_error() {
                error!(error = %e, "Webhook processing failed");
            } else {
                warn!(error = %e, "Webhook rejected");
            }
            config.error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn envelope(action: &str, secret: &str, payload: Value) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "webhook_id": "wh-1",
            "secret_key": secret,
            "action": action,
            "license_id": 100,
            "payload": payload,
            "additional_data": {}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_secret_is_optional() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let config = Configuration::new().with_action(
            Action::AgentDeleted,
            move |_license_id: i64, _payload: Payload| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), HandlerError>(())
                }
            },
            None,
        );

        let body = envelope("agent_deleted", "anything", json!({"agent_id": "smith@example.com"}));
        config.dispatch(&body).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unregistered_known_action() {
        let config = Configuration::new();
        let body = envelope("agent_deleted", "", json!({"agent_id": "a"}));
        let err = config.dispatch(&body).await.unwrap_err();

        assert!(matches!(err, WebhookError::UnknownAction(ref a) if a == "agent_deleted"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_payload_decode_failure() {
        let config = Configuration::new().with_action(
            Action::AgentDeleted,
            |_: i64, _: Payload| async { Ok::<(), HandlerError>(()) },
            None,
        );
        let body = envelope("agent_deleted", "", json!({"agent": 1}));
        let err = config.dispatch(&body).await.unwrap_err();

        assert!(matches!(err, WebhookError::PayloadDecode { .. }));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
