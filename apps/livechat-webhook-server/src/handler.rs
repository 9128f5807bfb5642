//! Handler that logs every received webhook

use async_trait::async_trait;
use livechat_webhooks::{HandlerError, Payload, WebhookHandler};
use tracing::info;

pub struct LoggingHandler;

#[async_trait]
impl WebhookHandler for LoggingHandler {
    async fn handle(&self, license_id: i64, payload: Payload) -> Result<(), HandlerError> {
        info!(
            license_id,
            action = %payload.action(),
            chat_id = chat_id(&payload).unwrap_or("-"),
            "Webhook received"
        );
        Ok(())
    }
}

/// Chat the payload refers to
fn chat_id(payload: &Payload) -> Option<&str> {
    let id = match payload {
        Payload::IncomingChatThread(p) => &p.chat.id,
        Payload::ThreadClosed(p) => &p.chat_id,
        Payload::AccessSet(p) | Payload::AccessGranted(p) | Payload::AccessRevoked(p) => {
            if p.resource != "chat" {
                return None;
            }
            &p.id
        }
        Payload::ChatUserAdded(p) => &p.chat_id,
        Payload::ChatUserRemoved(p) => &p.chat_id,
        Payload::IncomingEvent(p) | Payload::EventUpdated(p) => &p.chat_id,
        Payload::IncomingRichMessagePostback(p) => &p.chat_id,
        Payload::ChatPropertiesUpdated(p) => &p.chat_id,
        Payload::ChatPropertiesDeleted(p) => &p.chat_id,
        Payload::ChatThreadPropertiesUpdated(p) => &p.chat_id,
        Payload::ChatThreadPropertiesDeleted(p) => &p.chat_id,
        Payload::EventPropertiesUpdated(p) => &p.chat_id,
        Payload::EventPropertiesDeleted(p) => &p.chat_id,
        Payload::ChatThreadTagged(p) | Payload::ChatThreadUntagged(p) => &p.chat_id,
        Payload::EventsMarkedAsSeen(p) => &p.chat_id,
        Payload::FollowUpRequested(p) => &p.chat_id,
        Payload::AgentStatusChanged(_) | Payload::AgentDeleted(_) | Payload::CustomerCreated(_) => {
            return None
        }
    };
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use livechat_webhooks::Action;
    use serde_json::json;

    #[test]
    fn test_chat_id() {
        let payload = Payload::decode(
            Action::FollowUpRequested,
            json!({"chat_id": "XXXX", "thread_id": "YYYY", "customer_id": "AAA"}),
        )
        .unwrap();
        assert_eq!(chat_id(&payload), Some("XXXX"));

        let payload = Payload::decode(Action::AgentDeleted, json!({"agent_id": "a@b.c"})).unwrap();
        assert_eq!(chat_id(&payload), None);
    }

    #[tokio::test]
    async fn test_handler_accepts_everything() {
        let payload = Payload::decode(Action::AgentDeleted, json!({"agent_id": "a@b.c"})).unwrap();
        assert!(LoggingHandler.handle(1, payload).await.is_ok());
    }
}
