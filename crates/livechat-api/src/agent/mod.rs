//! Agent API
//!
//! Actions performed on behalf of an agent or a bot: chat lifecycle,
//! events, access, tags, properties and customer management.

mod models;

pub use models::*;

use chrono::{DateTime, Utc};
use livechat_objects::{
    Access, Chat, Customer, DeletedProperties, Event, InitialChat, Properties, Recipients,
    UserType, ValidationError,
};
use tracing::instrument;

use crate::client::Api;
use crate::error::Result;
use crate::filters::{ArchivesFilters, ChatsFilters, CustomersFilters, ThreadsFilters};
use crate::models::{
    ChatIdRequest, CustomerDetails, GetChatRequest, ListChatsRequest, ListChatsResponse,
    ListThreadsRequest, ListThreadsResponse, MarkEventsAsSeenRequest, Page, PostbackAnswer,
    PropertiesRequest, ResumeChatResponse, RichMessagePostbackRequest, SendEventRequest,
    SendEventResponse, StartChatRequest, StartChatResponse,
};

/// Client for the Agent API
#[derive(Debug, Clone)]
pub struct AgentApi {
    api: Api,
}

impl From<Api> for AgentApi {
    fn from(api: Api) -> Self {
        Self { api }
    }
}

impl AgentApi {
    /// The underlying low-level client, for actions without a typed wrapper
    pub fn api(&self) -> &Api {
        &self.api
    }

    // ===== Chats =====

    /// List chat summaries matching `filters`
    #[instrument(skip(self, filters, page))]
    pub async fn list_chats(
        &self,
        filters: &ChatsFilters,
        page: &Page,
    ) -> Result<ListChatsResponse> {
        self.api
            .call("list_chats", &ListChatsRequest::new(Some(filters), page))
            .await
    }

    /// List threads of a chat
    #[instrument(skip(self, filters, page))]
    pub async fn list_threads(
        &self,
        chat_id: &str,
        filters: &ThreadsFilters,
        page: &Page,
        min_events_count: Option<u32>,
    ) -> Result<ListThreadsResponse> {
        let request = ListThreadsRequest {
            chat_id,
            list: ListChatsRequest::new(Some(filters), page),
            min_events_count,
        };
        self.api.call("list_threads", &request).await
    }

    /// Get a chat with one thread: `thread_id` or the latest one
    #[instrument(skip(self))]
    pub async fn get_chat(&self, chat_id: &str, thread_id: Option<&str>) -> Result<Chat> {
        self.api
            .call("get_chat", &GetChatRequest { chat_id, thread_id })
            .await
    }

    /// Search archived chats
    #[instrument(skip(self, filters, page))]
    pub async fn list_archives(
        &self,
        filters: &ArchivesFilters,
        page: &Page,
    ) -> Result<ListArchivesResponse> {
        self.api
            .call("list_archives", &ListChatsRequest::new(Some(filters), page))
            .await
    }

    /// Start a new chat, optionally described by `chat`
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

    /// Restart an archived chat
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

    /// Close the active thread of a chat
    #[instrument(skip(self))]
    pub async fn deactivate_chat(&self, chat_id: &str) -> Result<()> {
        self.api
            .call_empty("deactivate_chat", &ChatIdRequest { chat_id })
            .await
    }

    #[instrument(skip(self))]
    pub async fn follow_chat(&self, chat_id: &str) -> Result<()> {
        self.api
            .call_empty("follow_chat", &ChatIdRequest { chat_id })
            .await
    }

    #[instrument(skip(self))]
    pub async fn unfollow_chat(&self, chat_id: &str) -> Result<()> {
        self.api
            .call_empty("unfollow_chat", &ChatIdRequest { chat_id })
            .await
    }

    // ===== Access =====

    #[instrument(skip(self, access))]
    pub async fn grant_access(&self, chat_id: &str, access: &Access) -> Result<()> {
        self.access_action("grant_chat_access", chat_id, access).await
    }

    #[instrument(skip(self, access))]
    pub async fn revoke_access(&self, chat_id: &str, access: &Access) -> Result<()> {
        self.access_action("revoke_chat_access", chat_id, access).await
    }

    /// Replace the access of a chat
    #[instrument(skip(self, access))]
    pub async fn set_access(&self, chat_id: &str, access: &Access) -> Result<()> {
        self.access_action("set_chat_access", chat_id, access).await
    }

    async fn access_action(&self, action: &str, chat_id: &str, access: &Access) -> Result<()> {
        let request = AccessRequest {
            resource: "chat",
            id: chat_id,
            access,
        };
        self.api.call_empty(action, &request).await
    }

    /// Transfer a chat to agents or groups; without a target the chat is
    /// routed again within its current groups
    #[instrument(skip(self))]
    pub async fn transfer_chat(
        &self,
        chat_id: &str,
        target: Option<&TransferTarget>,
        force: bool,
    ) -> Result<()> {
        let request = TransferChatRequest {
            id: chat_id,
            target,
            force,
        };
        self.api.call_empty("transfer_chat", &request).await
    }

    // ===== Chat users =====

    #[instrument(skip(self))]
    pub async fn add_user_to_chat(
        &self,
        chat_id: &str,
        user_id: &str,
        user_type: &UserType,
        require_active_thread: Option<bool>,
    ) -> Result<()> {
        let request = ChatUserRequest {
            chat_id,
            user_id,
            user_type,
            require_active_thread,
        };
        self.api.call_empty("add_user_to_chat", &request).await
    }

    #[instrument(skip(self))]
    pub async fn remove_user_from_chat(
        &self,
        chat_id: &str,
        user_id: &str,
        user_type: &UserType,
    ) -> Result<()> {
        let request = ChatUserRequest {
            chat_id,
            user_id,
            user_type,
            require_active_thread: None,
        };
        self.api.call_empty("remove_user_from_chat", &request).await
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

    /// Upload a file and return its URL, ready to be sent as a file event
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

    #[instrument(skip(self))]
    pub async fn send_typing_indicator(
        &self,
        chat_id: &str,
        recipients: Recipients,
        is_typing: bool,
    ) -> Result<()> {
        let request = TypingIndicatorRequest {
            chat_id,
            recipients,
            is_typing,
        };
        self.api.call_empty("send_typing_indicator", &request).await
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

    // ===== Thread tags =====

    #[instrument(skip(self))]
    pub async fn tag_thread(&self, chat_id: &str, thread_id: &str, tag: &str) -> Result<()> {
        let request = TagRequest {
            chat_id,
            thread_id,
            tag,
        };
        self.api.call_empty("tag_thread", &request).await
    }

    #[instrument(skip(self))]
    pub async fn untag_thread(&self, chat_id: &str, thread_id: &str, tag: &str) -> Result<()> {
        let request = TagRequest {
            chat_id,
            thread_id,
            tag,
        };
        self.api.call_empty("untag_thread", &request).await
    }

    // ===== Customers =====

    #[instrument(skip(self))]
    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer> {
        self.api
            .call("get_customer", &IdRequest { id: customer_id })
            .await
    }

    /// List customers, optionally sorted by `sort_by` (e.g. `created_at`)
    #[instrument(skip(self, filters, page))]
    pub async fn list_customers(
        &self,
        filters: &CustomersFilters,
        sort_by: Option<&str>,
        page: &Page,
    ) -> Result<ListCustomersResponse> {
        self.api
            .call(
                "list_customers",
                &ListCustomersRequest::new(filters, sort_by, page),
            )
            .await
    }

    /// Create a customer and return its ID
    #[instrument(skip(self, details))]
    pub async fn create_customer(&self, details: &CustomerDetails) -> Result<String> {
        let response: CreateCustomerResponse = self.api.call("create_customer", details).await?;
        Ok(response.customer_id)
    }

    #[instrument(skip(self, details))]
    pub async fn update_customer(
        &self,
        customer_id: &str,
        details: &CustomerDetails,
    ) -> Result<()> {
        let request = UpdateCustomerRequest {
            id: customer_id,
            details,
        };
        self.api.call_empty("update_customer", &request).await
    }

    /// Ban a customer for `days` days
    #[instrument(skip(self))]
    pub async fn ban_customer(&self, customer_id: &str, days: u32) -> Result<()> {
        let request = BanCustomerRequest {
            id: customer_id,
            ban: Ban { days },
        };
        self.api.call_empty("ban_customer", &request).await
    }

    // ===== Status =====

    /// Set the routing status of `agent_id`, or of the caller when `None`
    #[instrument(skip(self))]
    pub async fn set_routing_status(
        &self,
        agent_id: Option<&str>,
        status: RoutingStatus,
    ) -> Result<()> {
        let request = RoutingStatusRequest { agent_id, status };
        self.api.call_empty("set_routing_status", &request).await
    }
}
