//! Request and response shapes shared by the agent and customer APIs

use chrono::{DateTime, Utc};
use livechat_objects::{Access, Event, Properties, Thread, User};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordering of paginated lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Pagination shared by the list actions. A page ID, once known, replaces
/// every other criterion of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub sort_order: SortOrder,
    pub limit: Option<u32>,
    pub page_id: Option<String>,
}

impl Page {
    pub fn first(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn next(page_id: impl Into<String>) -> Self {
        Self {
            page_id: Some(page_id.into()),
            ..Self::default()
        }
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// Customer fields that can be set on creation or update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomerDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub session_fields: Vec<HashMap<String, String>>,
}

/// Chat as listed by `list_chats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: String,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub last_thread_summary: Option<ThreadSummary>,
    #[serde(default)]
    pub last_event_per_type: HashMap<String, LastEvent>,
    #[serde(default)]
    pub is_followed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub id: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub user_ids: Vec<String>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastEvent {
    pub thread_id: String,
    #[serde(default)]
    pub thread_order: i64,
    pub event: Event,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListChatsResponse {
    #[serde(default)]
    pub chats_summary: Vec<ChatSummary>,
    #[serde(default, alias = "total_chats")]
    pub found_chats: u64,
    #[serde(default)]
    pub next_page_id: Option<String>,
    #[serde(default)]
    pub previous_page_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListThreadsResponse {
    #[serde(default)]
    pub threads: Vec<Thread>,
    #[serde(default)]
    pub found_threads: u64,
    #[serde(default)]
    pub next_page_id: Option<String>,
    #[serde(default)]
    pub previous_page_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartChatResponse {
    pub chat_id: String,
    pub thread_id: String,
    #[serde(default)]
    pub event_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeChatResponse {
    pub thread_id: String,
    #[serde(default)]
    pub event_ids: Vec<String>,
}

/// Body of actions that take no arguments
#[derive(Serialize)]
pub(crate) struct EmptyRequest {}

#[derive(Deserialize)]
pub(crate) struct SendEventResponse {
    pub event_id: String,
}

#[derive(Serialize)]
pub(crate) struct ListChatsRequest<'a, F: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<&'a F>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<&'a str>,
}

impl<'a, F: Serialize> ListChatsRequest<'a, F> {
    pub fn new(filters: Option<&'a F>, page: &'a Page) -> Self {
        match page.page_id.as_deref() {
            Some(page_id) => Self {
                filters: None,
                sort_order: None,
                limit: None,
                page_id: Some(page_id),
            },
            None => Self {
                filters,
                sort_order: Some(page.sort_order),
                limit: page.limit,
                page_id: None,
            },
        }
    }
}

#[derive(Serialize)]
pub(crate) struct ListThreadsRequest<'a, F: Serialize> {
    pub chat_id: &'a str,
    #[serde(flatten)]
    pub list: ListChatsRequest<'a, F>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_events_count: Option<u32>,
}

#[derive(Serialize)]
pub(crate) struct StartChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat: Option<&'a livechat_objects::InitialChat>,
    pub continuous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Serialize)]
pub(crate) struct ChatIdRequest<'a> {
    #[serde(rename = "id")]
    pub chat_id: &'a str,
}

#[derive(Serialize)]
pub(crate) struct GetChatRequest<'a> {
    pub chat_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<&'a str>,
}

#[derive(Serialize)]
pub(crate) struct SendEventRequest<'a> {
    pub chat_id: &'a str,
    pub event: &'a Event,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attach_to_last_thread: Option<bool>,
}

#[derive(Serialize)]
pub(crate) struct RichMessagePostbackRequest<'a> {
    pub chat_id: &'a str,
    pub thread_id: &'a str,
    pub event_id: &'a str,
    pub postback: PostbackAnswer<'a>,
}

#[derive(Serialize)]
pub(crate) struct PostbackAnswer<'a> {
    pub id: &'a str,
    pub toggled: bool,
}

/// Properties update or deletion. Chat-level requests name the chat `id`,
/// thread and event level ones `chat_id`.
#[derive(Serialize)]
pub(crate) struct PropertiesRequest<'a, P: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<&'a str>,
    pub properties: &'a P,
}

impl<'a, P: Serialize> PropertiesRequest<'a, P> {
    pub fn chat(chat_id: &'a str, properties: &'a P) -> Self {
        Self {
            id: Some(chat_id),
            chat_id: None,
            thread_id: None,
            event_id: None,
            properties,
        }
    }

    pub fn thread(chat_id: &'a str, thread_id: &'a str, properties: &'a P) -> Self {
        Self {
            id: None,
            chat_id: Some(chat_id),
            thread_id: Some(thread_id),
            event_id: None,
            properties,
        }
    }

    pub fn event(
        chat_id: &'a str,
        thread_id: &'a str,
        event_id: &'a str,
        properties: &'a P,
    ) -> Self {
        Self {
            event_id: Some(event_id),
            ..Self::thread(chat_id, thread_id, properties)
        }
    }
}

#[derive(Serialize)]
pub(crate) struct MarkEventsAsSeenRequest<'a> {
    pub chat_id: &'a str,
    pub seen_up_to: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::ChatsFilters;
    use serde_json::json;

    #[test]
    fn test_page_id_replaces_criteria() {
        let filters = ChatsFilters::new();

        let first = Page::first(10).with_sort_order(SortOrder::Asc);
        let request = ListChatsRequest::new(Some(&filters), &first);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"filters": {"include_active": true}, "sort_order": "asc", "limit": 10})
        );

        let next = Page::next("MTU5MTEwMTUxNTQ=");
        let request = ListChatsRequest::new(Some(&filters), &next);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"page_id": "MTU5MTEwMTUxNTQ="})
        );
    }

    #[test]
    fn test_list_threads_request_flattens_paging() {
        let page = Page::first(5);
        let request = ListThreadsRequest::<ChatsFilters> {
            chat_id: "PJ0MRSHTDG",
            list: ListChatsRequest::new(None, &page),
            min_events_count: Some(1),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"chat_id": "PJ0MRSHTDG", "sort_order": "desc", "limit": 5, "min_events_count": 1})
        );
    }
}
