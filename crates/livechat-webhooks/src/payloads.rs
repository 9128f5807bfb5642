//! Typed webhook payloads
//!
//! Each action carries its own payload shape. [`Payload::decode`] maps an
//! action to the type its payload is decoded into.

use chrono::{DateTime, Utc};
use livechat_objects::{
    Access, Chat, DeletedProperties, Event, Properties, Statistics, User, UserType, Visit,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::action::Action;

/// `incoming_chat_thread`: a new thread started.
///
/// The chat arrives with a single `thread` object, which becomes the only
/// entry of `chat.threads`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IncomingChatThread {
    pub chat: Chat,
}

/// `thread_closed`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThreadClosed {
    pub chat_id: String,
    pub thread_id: String,
    /// Missing when the thread was closed by the system
    #[serde(default)]
    pub user_id: Option<String>,
}

/// `access_set`, `access_granted` and `access_revoked`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessChanged {
    #[serde(default)]
    pub resource: String,
    pub id: String,
    pub access: Access,
}

/// `chat_user_added`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatUserAdded {
    pub chat_id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
    pub user: User,
    pub user_type: UserType,
}

/// `chat_user_removed`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatUserRemoved {
    pub chat_id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
    pub user_id: String,
    pub user_type: UserType,
}

/// `incoming_event` and `event_updated`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatEvent {
    pub chat_id: String,
    pub thread_id: String,
    pub event: Event,
}

/// `incoming_rich_message_postback`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IncomingRichMessagePostback {
    pub user_id: String,
    pub chat_id: String,
    pub thread_id: String,
    pub event_id: String,
    pub postback: PostbackAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostbackAnswer {
    pub id: String,
    pub toggled: bool,
}

/// `chat_properties_updated`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatPropertiesUpdated {
    pub chat_id: String,
    pub properties: Properties,
}

/// `chat_properties_deleted`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatPropertiesDeleted {
    pub chat_id: String,
    pub properties: DeletedProperties,
}

/// `chat_thread_properties_updated`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThreadPropertiesUpdated {
    pub chat_id: String,
    pub thread_id: String,
    pub properties: Properties,
}

/// `chat_thread_properties_deleted`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThreadPropertiesDeleted {
    pub chat_id: String,
    pub thread_id: String,
    pub properties: DeletedProperties,
}

/// `event_properties_updated`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventPropertiesUpdated {
    pub chat_id: String,
    pub thread_id: String,
    pub event_id: String,
    pub properties: Properties,
}

/// `event_properties_deleted`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventPropertiesDeleted {
    pub chat_id: String,
    pub thread_id: String,
    pub event_id: String,
    pub properties: DeletedProperties,
}

/// `chat_thread_tagged` and `chat_thread_untagged`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThreadTag {
    pub chat_id: String,
    pub thread_id: String,
    pub tag: String,
}

/// `agent_status_changed`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentStatusChanged {
    pub agent_id: String,
    pub status: String,
}

/// `agent_deleted`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentDeleted {
    pub agent_id: String,
}

/// `events_marked_as_seen`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventsMarkedAsSeen {
    pub user_id: String,
    pub chat_id: String,
    pub seen_up_to: DateTime<Utc>,
}

/// `customer_created`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerCreated {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub session_fields: Vec<HashMap<String, String>>,
    #[serde(default)]
    pub last_visit: Option<Visit>,
    #[serde(default)]
    pub statistics: Option<Statistics>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub agent_last_event_created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub customer_last_event_created_at: Option<DateTime<Utc>>,
}

/// `follow_up_requested`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FollowUpRequested {
    pub chat_id: String,
    pub thread_id: String,
    pub customer_id: String,
}

/// Decoded payload of one webhook
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    IncomingChatThread(IncomingChatThread),
    ThreadClosed(ThreadClosed),
    AccessSet(AccessChanged),
    ChatUserAdded(ChatUserAdded),
    ChatUserRemoved(ChatUserRemoved),
    IncomingEvent(ChatEvent),
    EventUpdated(ChatEvent),
    IncomingRichMessagePostback(IncomingRichMessagePostback),
    ChatPropertiesUpdated(ChatPropertiesUpdated),
    ChatPropertiesDeleted(ChatPropertiesDeleted),
    ChatThreadPropertiesUpdated(ThreadPropertiesUpdated),
    ChatThreadPropertiesDeleted(ThreadPropertiesDeleted),
    EventPropertiesUpdated(EventPropertiesUpdated),
    EventPropertiesDeleted(EventPropertiesDeleted),
    ChatThreadTagged(ThreadTag),
    ChatThreadUntagged(ThreadTag),
    AgentStatusChanged(AgentStatusChanged),
    AgentDeleted(AgentDeleted),
    EventsMarkedAsSeen(EventsMarkedAsSeen),
    AccessGranted(AccessChanged),
    AccessRevoked(AccessChanged),
    CustomerCreated(CustomerCreated),
    FollowUpRequested(FollowUpRequested),
}

impl Payload {
    /// Decode the raw payload of `action`
    pub fn decode(action: Action, raw: Value) -> serde_json::Result<Self> {
        use serde_json::from_value as de;

        Ok(match action {
            Action::IncomingChatThread => Payload::IncomingChatThread(de(raw)?),
            Action::ThreadClosed => Payload::ThreadClosed(de(raw)?),
            Action::AccessSet => Payload::AccessSet(de(raw)?),
            Action::ChatUserAdded => Payload::ChatUserAdded(de(raw)?),
            Action::ChatUserRemoved => Payload::ChatUserRemoved(de(raw)?),
            Action::IncomingEvent => Payload::IncomingEvent(de(raw)?),
            Action::EventUpdated => Payload::EventUpdated(de(raw)?),
            Action::IncomingRichMessagePostback => Payload::IncomingRichMessagePostback(de(raw)?),
            Action::ChatPropertiesUpdated => Payload::ChatPropertiesUpdated(de(raw)?),
            Action::ChatPropertiesDeleted => Payload::ChatPropertiesDeleted(de(raw)?),
            Action::ChatThreadPropertiesUpdated => Payload::ChatThreadPropertiesUpdated(de(raw)?),
            Action::ChatThreadPropertiesDeleted => Payload::ChatThreadPropertiesDeleted(de(raw)?),
            Action::EventPropertiesUpdated => Payload::EventPropertiesUpdated(de(raw)?),
            Action::EventPropertiesDeleted => Payload::EventPropertiesDeleted(de(raw)?),
            Action::ChatThreadTagged => Payload::ChatThreadTagged(de(raw)?),
            Action::ChatThreadUntagged => Payload::ChatThreadUntagged(de(raw)?),
            Action::AgentStatusChanged => Payload::AgentStatusChanged(de(raw)?),
            Action::AgentDeleted => Payload::AgentDeleted(de(raw)?),
            Action::EventsMarkedAsSeen => Payload::EventsMarkedAsSeen(de(raw)?),
            Action::AccessGranted => Payload::AccessGranted(de(raw)?),
            Action::AccessRevoked => Payload::AccessRevoked(de(raw)?),
            Action::CustomerCreated => Payload::CustomerCreated(de(raw)?),
            Action::FollowUpRequested => Payload::FollowUpRequested(de(raw)?),
        })
    }

    /// The action this payload was delivered with
    pub fn action(&self) -> Action {
        match self {
            Payload::IncomingChatThread(_) => Action::IncomingChatThread,
            Payload::ThreadClosed(_) => Action::ThreadClosed,
            Payload::AccessSet(_) => Action::AccessSet,
            Payload::ChatUserAdded(_) => Action::ChatUserAdded,
            Payload::ChatUserRemoved(_) => Action::ChatUserRemoved,
            Payload::IncomingEvent(_) => Action::IncomingEvent,
            Payload::EventUpdated(_) => Action::EventUpdated,
            Payload::IncomingRichMessagePostback(_) => Action::IncomingRichMessagePostback,
            Payload::ChatPropertiesUpdated(_) => Action::ChatPropertiesUpdated,
            Payload::ChatPropertiesDeleted(_) => Action::ChatPropertiesDeleted,
            Payload::ChatThreadPropertiesUpdated(_) => Action::ChatThreadPropertiesUpdated,
            Payload::ChatThreadPropertiesDeleted(_) => Action::ChatThreadPropertiesDeleted,
            Payload::EventPropertiesUpdated(_) => Action::EventPropertiesUpdated,
            Payload::EventPropertiesDeleted(_) => Action::EventPropertiesDeleted,
            Payload::ChatThreadTagged(_) => Action::ChatThreadTagged,
            Payload::ChatThreadUntagged(_) => Action::ChatThreadUntagged,
            Payload::AgentStatusChanged(_) => Action::AgentStatusChanged,
            Payload::AgentDeleted(_) => Action::AgentDeleted,
            Payload::EventsMarkedAsSeen(_) => Action::EventsMarkedAsSeen,
            Payload::AccessGranted(_) => Action::AccessGranted,
            Payload::AccessRevoked(_) => Action::AccessRevoked,
            Payload::CustomerCreated(_) => Action::CustomerCreated,
            Payload::FollowUpRequested(_) => Action::FollowUpRequested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn incoming_chat_thread() -> Value {
        json!({
            "chat": {
                "id": "PS0X0L086G",
                "users": [
                    {"id": "b7eff798", "type": "customer", "name": "Thomas Anderson"},
                    {"id": "smith@example.com", "type": "agent", "name": "Agent Smith"}
                ],
                "properties": {"routing": {"idle": false}},
                "access": {"group_ids": [0]},
                "thread": {
                    "id": "PZ070E0W1B",
                    "active": true,
                    "user_ids": ["b7eff798", "smith@example.com"],
                    "events": [
                        {
                            "id": "PZ070E0W1B_1",
                            "type": "message",
                            "text": "Hello",
                            "author_id": "b7eff798"
                        }
                    ],
                    "order": 1
                }
            }
        })
    }

    #[test]
    fn test_single_thread_becomes_threads() {
        let payload = Payload::decode(Action::IncomingChatThread, incoming_chat_thread()).unwrap();
        let Payload::IncomingChatThread(IncomingChatThread { chat }) = payload else {
            panic!("unexpected payload");
        };

        assert_eq!(chat.id, "PS0X0L086G");
        assert_eq!(chat.threads.len(), 1);
        assert_eq!(chat.threads[0].id, "PZ070E0W1B");
        assert_eq!(
            chat.threads[0].events[0].as_message().unwrap().text,
            "Hello"
        );
        assert_eq!(chat.agents.len(), 1);
        assert_eq!(chat.customers.len(), 1);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let a = Payload::decode(Action::IncomingChatThread, incoming_chat_thread()).unwrap();
        let b = Payload::decode(Action::IncomingChatThread, incoming_chat_thread()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shared_payload_types_keep_action() {
        let raw = json!({"chat_id": "C1", "thread_id": "T1", "tag": "support"});
        let tagged = Payload::decode(Action::ChatThreadTagged, raw.clone()).unwrap();
        let untagged = Payload::decode(Action::ChatThreadUntagged, raw).unwrap();

        assert_eq!(tagged.action(), Action::ChatThreadTagged);
        assert_eq!(untagged.action(), Action::ChatThreadUntagged);
    }

    #[test]
    fn test_deleted_properties() {
        let payload = Payload::decode(
            Action::ChatPropertiesDeleted,
            json!({"chat_id": "C1", "properties": {"rating": ["score", "comment"]}}),
        )
        .unwrap();

        let Payload::ChatPropertiesDeleted(deleted) = payload else {
            panic!("unexpected payload");
        };
        assert_eq!(deleted.properties["rating"], vec!["score", "comment"]);
    }

    #[test]
    fn test_wrong_shape_fails() {
        assert!(Payload::decode(Action::AgentDeleted, json!({"id": 5})).is_err());
    }
}
