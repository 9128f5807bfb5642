//! Webhook action names

use std::fmt;
use std::str::FromStr;

/// Webhook action, as named in the `action` field of the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    IncomingChatThread,
    ThreadClosed,
    AccessSet,
    ChatUserAdded,
    ChatUserRemoved,
    IncomingEvent,
    EventUpdated,
    IncomingRichMessagePostback,
    ChatPropertiesUpdated,
    ChatPropertiesDeleted,
    ChatThreadPropertiesUpdated,
    ChatThreadPropertiesDeleted,
    EventPropertiesUpdated,
    EventPropertiesDeleted,
    ChatThreadTagged,
    ChatThreadUntagged,
    AgentStatusChanged,
    AgentDeleted,
    EventsMarkedAsSeen,
    AccessGranted,
    AccessRevoked,
    CustomerCreated,
    FollowUpRequested,
}

impl Action {
    pub const ALL: [Action; 23] = [
        Action::IncomingChatThread,
        Action::ThreadClosed,
        Action::AccessSet,
        Action::ChatUserAdded,
        Action::ChatUserRemoved,
        Action::IncomingEvent,
        Action::EventUpdated,
        Action::IncomingRichMessagePostback,
        Action::ChatPropertiesUpdated,
        Action::ChatPropertiesDeleted,
        Action::ChatThreadPropertiesUpdated,
        Action::ChatThreadPropertiesDeleted,
        Action::EventPropertiesUpdated,
        Action::EventPropertiesDeleted,
        Action::ChatThreadTagged,
        Action::ChatThreadUntagged,
        Action::AgentStatusChanged,
        Action::AgentDeleted,
        Action::EventsMarkedAsSeen,
        Action::AccessGranted,
        Action::AccessRevoked,
        Action::CustomerCreated,
        Action::FollowUpRequested,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::IncomingChatThread => "incoming_chat_thread",
            Action::ThreadClosed => "thread_closed",
            Action::AccessSet => "access_set",
            Action::ChatUserAdded => "chat_user_added",
            Action::ChatUserRemoved => "chat_user_removed",
            Action::IncomingEvent => "incoming_event",
            Action::EventUpdated => "event_updated",
            Action::IncomingRichMessagePostback => "incoming_rich_message_postback",
            Action::ChatPropertiesUpdated => "chat_properties_updated",
            Action::ChatPropertiesDeleted => "chat_properties_deleted",
            Action::ChatThreadPropertiesUpdated => "chat_thread_properties_updated",
            Action::ChatThreadPropertiesDeleted => "chat_thread_properties_deleted",
            Action::EventPropertiesUpdated => "event_properties_updated",
            Action::EventPropertiesDeleted => "event_properties_deleted",
            Action::ChatThreadTagged => "chat_thread_tagged",
            Action::ChatThreadUntagged => "chat_thread_untagged",
            Action::AgentStatusChanged => "agent_status_changed",
            Action::AgentDeleted => "agent_deleted",
            Action::EventsMarkedAsSeen => "events_marked_as_seen",
            Action::AccessGranted => "access_granted",
            Action::AccessRevoked => "access_revoked",
            Action::CustomerCreated => "customer_created",
            Action::FollowUpRequested => "follow_up_requested",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action name this crate does not know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown webhook action '{}'", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}
