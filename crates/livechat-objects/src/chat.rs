//! Chats and threads
//!
//! On the wire a chat lists its participants in one flat `users` array. The
//! decoder splits that array into agents and customers keyed by user ID.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use crate::error::{ValidationError, ValidationResult};
use crate::event::Event;
use crate::properties::Properties;
use crate::user::{Agent, Customer, User};

/// Groups allowed to see a chat or thread
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access {
    #[serde(default)]
    pub group_ids: Vec<i64>,
}

impl Access {
    pub fn groups(group_ids: Vec<i64>) -> Self {
        Self { group_ids }
    }
}

/// A conversation. Participants are split by type at decode time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chat {
    pub id: String,
    pub properties: Properties,
    pub access: Access,
    pub threads: Vec<Thread>,
    pub is_followed: bool,
    pub agents: HashMap<String, Agent>,
    pub customers: HashMap<String, Customer>,
}

impl Chat {
    /// Every participant: agents first, then customers
    pub fn users(&self) -> Vec<&User> {
        self.agents
            .values()
            .map(|a| &a.user)
            .chain(self.customers.values().map(|c| &c.user))
            .collect()
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.agents
            .get(id)
            .map(|a| &a.user)
            .or_else(|| self.customers.get(id).map(|c| &c.user))
    }

    /// Insert one raw participant into the matching collection.
    /// Types other than agent and customer are skipped.
    fn add_user(&mut self, raw: Value) -> serde_json::Result<()> {
        let kind = raw
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match kind.as_str() {
            "agent" => {
                let agent: Agent = serde_json::from_value(raw)?;
                self.agents.insert(agent.user.id.clone(), agent);
            }
            "customer" => {
                let customer: Customer = serde_json::from_value(raw)?;
                self.customers.insert(customer.user.id.clone(), customer);
            }
            other => {
                let id = raw.get("id").and_then(Value::as_str).unwrap_or_default();
                warn!(
                    chat_id = %self.id,
                    user_id = %id,
                    user_type = %other,
                    "Dropping chat user of unknown type"
                );
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct ChatWire {
    id: String,
    #[serde(default)]
    users: Vec<Value>,
    #[serde(default)]
    properties: Properties,
    #[serde(default)]
    access: Access,
    #[serde(default)]
    threads: Vec<Thread>,
    /// `get_chat` and `incoming_chat_thread` carry a single thread
    #[serde(default)]
    thread: Option<Thread>,
    #[serde(default)]
    is_followed: bool,
}

impl<'de> Deserialize<'de> for Chat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut wire = ChatWire::deserialize(deserializer)?;
        wire.threads.extend(wire.thread.take());

        let mut chat = Chat {
            id: wire.id,
            properties: wire.properties,
            access: wire.access,
            threads: wire.threads,
            is_followed: wire.is_followed,
            agents: HashMap::new(),
            customers: HashMap::new(),
        };

        for raw in wire.users {
            chat.add_user(raw).map_err(D::Error::custom)?;
        }

        Ok(chat)
    }
}

#[derive(Serialize)]
struct ChatRef<'a> {
    id: &'a str,
    users: Vec<&'a User>,
    properties: &'a Properties,
    access: &'a Access,
    threads: &'a [Thread],
    is_followed: bool,
}

impl Serialize for Chat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ChatRef {
            id: &self.id,
            users: self.users(),
            properties: &self.properties,
            access: &self.access,
            threads: &self.threads,
            is_followed: self.is_followed,
        }
        .serialize(serializer)
    }
}

/// One continuous part of a chat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    /// Unix seconds
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub user_ids: Vec<String>,
    #[serde(default)]
    pub restricted_access: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_thread_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_thread_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Chat description sent when starting or resuming a chat
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InitialChat {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    #[serde(skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<InitialThread>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InitialThread {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl InitialChat {
    /// Initial chat resuming an existing chat
    pub fn existing(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_thread(mut self, thread: InitialThread) -> Self {
        self.thread = Some(thread);
        self
    }

    pub fn with_access(mut self, access: Access) -> Self {
        self.access = Some(access);
        self
    }

    /// Checks the events of the initial thread are all sendable
    pub fn validate(&self) -> ValidationResult<()> {
        let Some(thread) = &self.thread else {
            return Ok(());
        };
        for (i, event) in thread.events.iter().enumerate() {
            if !event.kind.is_sendable() {
                return Err(ValidationError::InitialChat(format!(
                    "thread event {} has unsupported type '{}'",
                    i, event.kind
                )));
            }
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate) but also requires the chat ID
    pub fn validate_for_resume(&self) -> ValidationResult<()> {
        if self.id.is_empty() {
            return Err(ValidationError::MissingField("chat.id"));
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventType, Message};
    use serde_json::json;

    fn chat_json() -> Value {
        json!({
            "id": "PJ0MRSHTDG",
            "users": [
                {
                    "id": "b7eff798-f8df-4364-8059-649c35c9ed0c",
                    "type": "customer",
                    "name": "Thomas Anderson",
                    "email": "t.anderson@example.com",
                    "present": true,
                    "statistics": {"chats_count": 1}
                },
                {
                    "id": "smith@example.com",
                    "type": "agent",
                    "name": "Agent Smith",
                    "present": true,
                    "routing_status": "accepting_chats"
                }
            ],
            "properties": {"routing": {"continuous": false}},
            "access": {"group_ids": [0]},
            "threads": [
                {
                    "id": "K600PKZON8",
                    "timestamp": 1575530828,
                    "active": true,
                    "user_ids": ["b7eff798-f8df-4364-8059-649c35c9ed0c", "smith@example.com"],
                    "order": 2,
                    "events": [
                        {
                            "id": "K600PKZON8_1",
                            "type": "message",
                            "text": "Hello",
                            "author_id": "smith@example.com"
                        }
                    ]
                }
            ],
            "is_followed": true
        })
    }

    #[test]
    fn test_users_split_by_type() {
        let chat: Chat = serde_json::from_value(chat_json()).unwrap();

        assert_eq!(chat.agents.len(), 1);
        assert_eq!(chat.customers.len(), 1);
        assert_eq!(chat.users().len(), 2);
        assert!(chat.agents.contains_key("smith@example.com"));
        assert!(chat.customers.contains_key("b7eff798-f8df-4364-8059-649c35c9ed0c"));
        assert_eq!(
            chat.agents["smith@example.com"].routing_status.as_deref(),
            Some("accepting_chats")
        );
        assert_eq!(chat.user("smith@example.com").unwrap().name, "Agent Smith");
    }

    #[test]
    fn test_threads_and_events() {
        let chat: Chat = serde_json::from_value(chat_json()).unwrap();
        assert_eq!(chat.threads.len(), 1);

        let thread = &chat.threads[0];
        assert_eq!(thread.id, "K600PKZON8");
        assert_eq!(thread.order, 2);
        assert_eq!(thread.timestamp, Some(1575530828));
        assert_eq!(thread.events[0].as_message().unwrap().text, "Hello");
        assert_eq!(chat.access.group_ids, vec![0]);
        assert!(chat.is_followed);
    }

    #[test]
    fn test_unknown_user_type_dropped() {
        let chat: Chat = serde_json::from_value(json!({
            "id": "C1",
            "users": [
                {"id": "a1", "type": "agent"},
                {"id": "x1", "type": "bot"}
            ]
        }))
        .unwrap();

        assert_eq!(chat.users().len(), 1);
        assert!(chat.user("x1").is_none());
    }

    #[test]
    fn test_malformed_known_user_fails_decode() {
        let result: serde_json::Result<Chat> = serde_json::from_value(json!({
            "id": "C1",
            "users": [{"id": "c1", "type": "customer", "statistics": "lots"}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_single_thread_joins_threads() {
        let chat: Chat = serde_json::from_value(json!({
            "id": "PJ0MRSHTDG",
            "users": [],
            "thread": {"id": "K600PKZON8", "active": true, "events": []}
        }))
        .unwrap();

        assert_eq!(chat.threads.len(), 1);
        assert_eq!(chat.threads[0].id, "K600PKZON8");
        assert!(chat.threads[0].active);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let raw = serde_json::to_vec(&chat_json()).unwrap();
        let a: Chat = serde_json::from_slice(&raw).unwrap();
        let b: Chat = serde_json::from_slice(&raw).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialize_round_trip() {
        let chat: Chat = serde_json::from_value(chat_json()).unwrap();
        let encoded = serde_json::to_value(&chat).unwrap();
        assert_eq!(encoded["users"].as_array().map(Vec::len), Some(2));

        let decoded: Chat = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, chat);
    }

    #[test]
    fn test_initial_chat_validation() {
        let valid = InitialChat::default().with_thread(InitialThread {
            events: vec![Message::new("Hi").into()],
            properties: Properties::new(),
        });
        assert!(valid.validate().is_ok());
        assert_eq!(
            valid.validate_for_resume(),
            Err(ValidationError::MissingField("chat.id"))
        );

        let invalid = InitialChat::existing("PJ0MRSHTDG").with_thread(InitialThread {
            events: vec![Event::new(EventType::Other("annotation".to_string()))],
            properties: Properties::new(),
        });
        assert!(matches!(
            invalid.validate_for_resume(),
            Err(ValidationError::InitialChat(_))
        ));
    }
}
