//! Customer API
//!
//! Actions performed by a website visitor. Every request carries the
//! license ID of the token as a query parameter.

mod models;

pub use models::*;

use chrono::{DateTime, Utc};
use livechat_objects::{
    Chat, Customer, DeletedProperties, Event, InitialChat, Properties, ValidationError,
};
use std::collections::HashMap;
use tracing::instrument;

use crate::client::Api;
use crate::error::Result;
use crate::models::{
    ChatIdRequest, CustomerDetails, EmptyRequest, GetChatRequest, ListChatsRequest,
    ListChatsResponse, ListThreadsRequest, ListThreadsResponse, MarkEventsAsSeenRequest, Page,
    PostbackAnswer, PropertiesRequest, ResumeChatResponse, RichMessagePostbackRequest,
    SendEventRequest, SendEventResponse, StartChatRequest, StartChatResponse,
};

/// Client for the Customer API
#[derive(Debug, Clone)]
pub struct CustomerApi {
    api: Api,
}

impl From<Api> for CustomerApi {
    fn from(api: Api) -> Self {
        Self { api }
    }
}

impl CustomerApi {
    pub fn api(&self) -> &Api {
        &self.api
    }

    // ===== Chats =====

    #[instrument(skip(self, chat))]
    pub async fn start_chat(
        &self,
        chat: Option<&InitialChat>,
        continuous: bool,
        active: Option<bool>,
    ) -> Result<StartChatResponse> {
        if let Some(chat) = chat {
            chat.validate()?;
        }
        let request = StartChatRequest {
            chat,
            continuous,
            active,
        };
        self.api.call("start_chat", &request).await
    }

    #[instrument(skip(self, chat), fields(chat_id = %chat.id))]
    pub async fn resume_chat(
        &self,
        chat: &InitialChat,
        continuous: bool,
        active: Option<bool>,
    ) -> Result<ResumeChatResponse> {
        chat.validate_for_resume()?;
        let request = StartChatRequest {
            chat: Some(chat),
            continuous,
            active,
        };
        self.api.call("resume_chat", &request).await
    }

    #[instrument(skip(self))]
    pub async fn deactivate_chat(&self, chat_id: &str) -> Result<()> {
        self.api
            .call_empty("deactivate_chat", &ChatIdRequest { chat_id })
            .await
    }

    /// List the chats of the calling customer
    #[instrument(skip(self, page))]
    pub async fn list_chats(&self, page: &Page) -> Result<ListChatsResponse> {
        self.api
            .call(
                "list_chats",
                &ListChatsRequest::<EmptyRequest>::new(None, page),
            )
            .await
    }

    #[instrument(skip(self, page))]
    pub async fn list_threads(
        &self,
        chat_id: &str,
        page: &Page,
        min_events_count: Option<u32>,
    ) -> Result<ListThreadsResponse> {
        let request = ListThreadsRequest::<EmptyRequest> {
            chat_id,
            list: ListChatsRequest::new(None, page),
            min_events_count,
        };
        self.api.call("list_threads", &request).await
    }

    #[instrument(skip(self))]
    pub async fn get_chat(&self, chat_id: &str, thread_id: Option<&str>) -> Result<Chat> {
        self.api
            .call("get_chat", &GetChatRequest { chat_id, thread_id })
            .await
    }

    // ===== Events =====

    /// Send an event to a chat and return its ID.
    /// Only sendable event types are accepted; others fail without a request.
    #[instrument(skip(self, event), fields(event_type = %event.kind))]
    pub async fn send_event(
        &self,
        chat_id: &str,
        event: &Event,
        attach_to_last_thread: Option<bool>,
    ) -> Result<String> {
        if !event.kind.is_sendable() {
            return Err(ValidationError::UnsupportedEventType(event.kind.to_string()).into());
        }
        let request = SendEventRequest {
            chat_id,
            event,
            attach_to_last_thread,
        };
        let response: SendEventResponse = self.api.call("send_event", &request).await?;
        Ok(response.event_id)
    }

    pub async fn upload_file(&self, filename: &str, file: Vec<u8>) -> Result<String> {
        self.api.upload_file(filename, file).await
    }

    #[instrument(skip(self))]
    pub async fn send_rich_message_postback(
        &self,
        chat_id: &str,
        thread_id: &str,
        event_id: &str,
        postback_id: &str,
        toggled: bool,
    ) -> Result<()> {
        let request = RichMessagePostbackRequest {
            chat_id,
            thread_id,
            event_id,
            postback: PostbackAnswer {
                id: postback_id,
                toggled,
            },
        };
        self.api
            .call_empty("send_rich_message_postback", &request)
            .await
    }

    /// Show the agents what the customer is typing
    #[instrument(skip(self, text))]
    pub async fn send_sneak_peek(&self, chat_id: &str, text: &str) -> Result<()> {
        let request = SneakPeekRequest {
            chat_id,
            sneak_peek_text: text,
        };
        self.api.call_empty("send_sneak_peek", &request).await
    }

    #[instrument(skip(self))]
    pub async fn mark_events_as_seen(
        &self,
        chat_id: &str,
        seen_up_to: DateTime<Utc>,
    ) -> Result<()> {
        let request = MarkEventsAsSeenRequest {
            chat_id,
            seen_up_to,
        };
        self.api.call_empty("mark_events_as_seen", &request).await
    }

    // ===== Properties =====

    #[instrument(skip(self, properties))]
    pub async fn update_chat_properties(
        &self,
        chat_id: &str,
        properties: &Properties,
    ) -> Result<()> {
        self.api
            .call_empty(
                "update_chat_properties",
                &PropertiesRequest::chat(chat_id, properties),
            )
            .await
    }

    #[instrument(skip(self, properties))]
    pub async fn delete_chat_properties(
        &self,
        chat_id: &str,
        properties: &DeletedProperties,
    ) -> Result<()> {
        self.api
            .call_empty(
                "delete_chat_properties",
                &PropertiesRequest::chat(chat_id, properties),
            )
            .await
    }

    #[instrument(skip(self, properties))]
    pub async fn update_thread_properties(
        &self,
        chat_id: &str,
        thread_id: &str,
        properties: &Properties,
    ) -> Result<()> {
        let request = PropertiesRequest::thread(chat_id, thread_id, properties);
        self.api
            .call_empty("update_thread_properties", &request)
            .await
    }

    #[instrument(skip(self, properties))]
    pub async fn delete_thread_properties(
        &self,
        chat_id: &str,
        thread_id: &str,
        properties: &DeletedProperties,
    ) -> Result<()> {
        let request = PropertiesRequest::thread(chat_id, thread_id, properties);
        self.api
            .call_empty("delete_thread_properties", &request)
            .await
    }

    #[instrument(skip(self, properties))]
    pub async fn update_event_properties(
        &self,
        chat_id: &str,
        thread_id: &str,
        event_id: &str,
        properties: &Properties,
    ) -> Result<()> {
        let request = PropertiesRequest::event(chat_id, thread_id, event_id, properties);
        self.api
            .call_empty("update_event_properties", &request)
            .await
    }

    #[instrument(skip(self, properties))]
    pub async fn delete_event_properties(
        &self,
        chat_id: &str,
        thread_id: &str,
        event_id: &str,
        properties: &DeletedProperties,
    ) -> Result<()> {
        let request = PropertiesRequest::event(chat_id, thread_id, event_id, properties);
        self.api
            .call_empty("delete_event_properties", &request)
            .await
    }

    // ===== Customer =====

    /// The calling customer
    #[instrument(skip(self))]
    pub async fn get_customer(&self) -> Result<Customer> {
        self.api.call("get_customer", &EmptyRequest {}).await
    }

    #[instrument(skip(self, details))]
    pub async fn update_customer(&self, details: &CustomerDetails) -> Result<()> {
        self.api.call_empty("update_customer", details).await
    }

    #[instrument(skip(self, session_fields))]
    pub async fn set_customer_session_fields(
        &self,
        session_fields: &[HashMap<String, String>],
    ) -> Result<()> {
        let request = SessionFieldsRequest { session_fields };
        self.api
            .call_empty("set_customer_session_fields", &request)
            .await
    }

    // ===== Groups, forms and URLs =====

    /// Status of the given groups, or of every group when `group_ids` is empty
    #[instrument(skip(self))]
    pub async fn list_group_statuses(
        &self,
        group_ids: &[i64],
    ) -> Result<HashMap<i64, GroupStatus>> {
        let response: GroupStatusesResponse = self
            .api
            .call("list_group_statuses", &GroupStatusesRequest::new(group_ids))
            .await?;
        Ok(response.groups_status)
    }

    #[instrument(skip(self))]
    pub async fn get_url_info(&self, url: &str) -> Result<UrlInfo> {
        self.api.call("get_url_info", &UrlInfoRequest { url }).await
    }

    #[instrument(skip(self))]
    pub async fn get_form(&self, group_id: i64, kind: FormType) -> Result<GetFormResponse> {
        self.api
            .call("get_form", &GetFormRequest { group_id, kind })
            .await
    }
}
