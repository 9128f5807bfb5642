//! Chat events
//!
//! An [`Event`] is decoded from a single flat JSON object whose `type` field
//! selects the variant. Only the fields shared by every event are parsed up
//! front. The variant-specific fields are kept as raw JSON and interpreted on
//! demand by the `as_*` accessors, which return `None` when the event has a
//! different type or when its fields do not have the expected shape.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

use crate::properties::Properties;

/// Event discriminator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Message,
    SystemMessage,
    FilledForm,
    File,
    RichMessage,
    Custom,
    /// Any type this crate does not know about yet
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Message => "message",
            Self::SystemMessage => "system_message",
            Self::FilledForm => "filled_form",
            Self::File => "file",
            Self::RichMessage => "rich_message",
            Self::Custom => "custom",
            Self::Other(other) => other,
        }
    }

    /// Whether events of this type may be posted through `send_event`
    pub fn is_sendable(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for EventType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "message" => Self::Message,
            "system_message" => Self::SystemMessage,
            "filled_form" => Self::FilledForm,
            "file" => Self::File,
            "rich_message" => Self::RichMessage,
            "custom" => Self::Custom,
            _ => Self::Other(value),
        }
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who can see an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipients {
    #[default]
    All,
    Agents,
}

/// A single chat event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author_id: String,
    #[serde(default)]
    pub recipients: Recipients,
    #[serde(rename = "type", default)]
    pub kind: EventType,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Event {
    /// Empty event of the given type, ready to be filled and sent
    pub fn new(kind: EventType) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.custom_id = Some(custom_id.into());
        self
    }

    pub fn with_recipients(mut self, recipients: Recipients) -> Self {
        self.recipients = recipients;
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Variant-specific field, still undecoded
    pub fn raw_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn as_message(&self) -> Option<Message> {
        self.view()
    }

    pub fn as_system_message(&self) -> Option<SystemMessage> {
        self.view()
    }

    pub fn as_filled_form(&self) -> Option<FilledForm> {
        self.view()
    }

    pub fn as_file(&self) -> Option<File> {
        self.view()
    }

    pub fn as_rich_message(&self) -> Option<RichMessage> {
        self.view()
    }

    pub fn as_custom(&self) -> Option<CustomEvent> {
        self.view()
    }

    fn view<V: EventView>(&self) -> Option<V> {
        if self.kind != V::KIND {
            return None;
        }
        let fields = Value::Object(self.fields.clone());
        let mut view: V = serde_json::from_value(fields).ok()?;
        *view.event_mut() = self.clone();
        Some(view)
    }
}

/// Typed interpretation of an event's variant-specific fields
trait EventView: Serialize + DeserializeOwned {
    const KIND: EventType;

    fn event_mut(&mut self) -> &mut Event;

    fn into_event(mut self) -> Event {
        let mut event = std::mem::take(self.event_mut());
        event.kind = Self::KIND;
        match serde_json::to_value(&self) {
            Ok(Value::Object(fields)) => event.fields.extend(fields),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(kind = %Self::KIND, error = %e, "Failed to encode event fields")
            }
        }
        event
    }
}

/// `message` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(skip)]
    pub event: Event,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postback: Option<Postback>,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            event: Event::new(EventType::Message),
            text: text.into(),
            postback: None,
        }
    }
}

/// Rich message button click carried by a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Postback {
    pub id: String,
    #[serde(default)]
    pub thread_id: String,
    #[serde(default)]
    pub event_id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: String,
}

/// `system_message` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage {
    #[serde(skip)]
    pub event: Event,
    #[serde(default)]
    pub system_message_type: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub text_vars: HashMap<String, String>,
}

impl SystemMessage {
    pub fn new(system_message_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            event: Event::new(EventType::SystemMessage),
            system_message_type: system_message_type.into(),
            text: text.into(),
            text_vars: HashMap::new(),
        }
    }
}

/// `filled_form` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledForm {
    #[serde(skip)]
    pub event: Event,
    #[serde(default)]
    pub form_id: String,
    pub fields: Vec<FilledFormField>,
}

/// One answered form field. Choosers answer with objects, checkboxes with a
/// list, everything else with a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledFormField {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<Value>>,
}

/// `file` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    #[serde(skip)]
    pub event: Event,
    #[serde(default)]
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail2x_url: Option<String>,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl File {
    /// File event pointing at an already uploaded file
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            event: Event::new(EventType::File),
            name: String::new(),
            url: url.into(),
            thumbnail_url: None,
            thumbnail2x_url: None,
            content_type: String::new(),
            size: 0,
            width: None,
            height: None,
        }
    }
}

/// `rich_message` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichMessage {
    #[serde(skip)]
    pub event: Event,
    pub template_id: String,
    #[serde(default)]
    pub elements: Vec<RichMessageElement>,
}

impl RichMessage {
    pub fn new(template_id: impl Into<String>, elements: Vec<RichMessageElement>) -> Self {
        Self {
            event: Event::new(EventType::RichMessage),
            template_id: template_id.into(),
            elements,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichMessageElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<RichMessageImage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<RichMessageButton>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichMessageImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichMessageButton {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postback_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webview_height: Option<String>,
}

/// `custom` event with an application-defined body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomEvent {
    #[serde(skip)]
    pub event: Event,
    #[serde(default)]
    pub content: Value,
}

impl CustomEvent {
    pub fn new(content: Value) -> Self {
        Self {
            event: Event::new(EventType::Custom),
            content,
        }
    }
}

impl EventView for Message {
    const KIND: EventType = EventType::Message;

    fn event_mut(&mut self) -> &mut Event {
        &mut self.event
    }
}

impl EventView for SystemMessage {
    const KIND: EventType = EventType::SystemMessage;

    fn event_mut(&mut self) -> &mut Event {
        &mut self.event
    }
}

impl EventView for FilledForm {
    const KIND: EventType = EventType::FilledForm;

    fn event_mut(&mut self) -> &mut Event {
        &mut self.event
    }
}

impl EventView for File {
    const KIND: EventType = EventType::File;

    fn event_mut(&mut self) -> &mut Event {
        &mut self.event
    }
}

impl EventView for RichMessage {
    const KIND: EventType = EventType::RichMessage;

    fn event_mut(&mut self) -> &mut Event {
        &mut self.event
    }
}

impl EventView for CustomEvent {
    const KIND: EventType = EventType::Custom;

    fn event_mut(&mut self) -> &mut Event {
        &mut self.event
    }
}

impl From<Message> for Event {
    fn from(view: Message) -> Self {
        view.into_event()
    }
}

impl From<SystemMessage> for Event {
    fn from(view: SystemMessage) -> Self {
        view.into_event()
    }
}

impl From<FilledForm> for Event {
    fn from(view: FilledForm) -> Self {
        view.into_event()
    }
}

impl From<File> for Event {
    fn from(view: File) -> Self {
        view.into_event()
    }
}

impl From<RichMessage> for Event {
    fn from(view: RichMessage) -> Self {
        view.into_event()
    }
}

impl From<CustomEvent> for Event {
    fn from(view: CustomEvent) -> Self {
        view.into_event()
    }
}
