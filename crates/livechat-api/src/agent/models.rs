//! Agent API request and response shapes

use livechat_objects::{Access, Chat, Customer, Recipients, UserType};
use serde::{Deserialize, Serialize};

use crate::filters::CustomersFilters;
use crate::models::{CustomerDetails, Page, SortOrder};

/// Where a chat is transferred to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "ids")]
pub enum TransferTarget {
    #[serde(rename = "agent")]
    Agents(Vec<String>),
    #[serde(rename = "group")]
    Groups(Vec<i64>),
}

/// Agent availability for new chats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStatus {
    AcceptingChats,
    NotAcceptingChats,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListArchivesResponse {
    #[serde(default)]
    pub chats: Vec<Chat>,
    #[serde(default)]
    pub found_chats: u64,
    #[serde(default)]
    pub next_page_id: Option<String>,
    #[serde(default)]
    pub previous_page_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListCustomersResponse {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub total_customers: u64,
    #[serde(default)]
    pub next_page_id: Option<String>,
    #[serde(default)]
    pub previous_page_id: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct CreateCustomerResponse {
    pub customer_id: String,
}

#[derive(Serialize)]
pub(crate) struct ListCustomersRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<&'a CustomersFilters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<&'a str>,
}

impl<'a> ListCustomersRequest<'a> {
    pub fn new(filters: &'a CustomersFilters, sort_by: Option<&'a str>, page: &'a Page) -> Self {
        match page.page_id.as_deref() {
            Some(page_id) => Self {
                filters: None,
                sort_order: None,
                sort_by: None,
                limit: None,
                page_id: Some(page_id),
            },
            None => Self {
                filters: Some(filters),
                sort_order: Some(page.sort_order),
                sort_by,
                limit: page.limit,
                page_id: None,
            },
        }
    }
}

#[derive(Serialize)]
pub(crate) struct AccessRequest<'a> {
    pub resource: &'a str,
    pub id: &'a str,
    pub access: &'a Access,
}

#[derive(Serialize)]
pub(crate) struct TransferChatRequest<'a> {
    pub id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<&'a TransferTarget>,
    pub force: bool,
}

#[derive(Serialize)]
pub(crate) struct ChatUserRequest<'a> {
    pub chat_id: &'a str,
    pub user_id: &'a str,
    pub user_type: &'a UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_active_thread: Option<bool>,
}

#[derive(Serialize)]
pub(crate) struct TagRequest<'a> {
    pub chat_id: &'a str,
    pub thread_id: &'a str,
    pub tag: &'a str,
}

#[derive(Serialize)]
pub(crate) struct IdRequest<'a> {
    pub id: &'a str,
}

#[derive(Serialize)]
pub(crate) struct UpdateCustomerRequest<'a> {
    pub id: &'a str,
    #[serde(flatten)]
    pub details: &'a CustomerDetails,
}

#[derive(Serialize)]
pub(crate) struct BanCustomerRequest<'a> {
    pub id: &'a str,
    pub ban: Ban,
}

#[derive(Serialize)]
pub(crate) struct Ban {
    pub days: u32,
}

#[derive(Serialize)]
pub(crate) struct RoutingStatusRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<&'a str>,
    pub status: RoutingStatus,
}

#[derive(Serialize)]
pub(crate) struct TypingIndicatorRequest<'a> {
    pub chat_id: &'a str,
    pub recipients: Recipients,
    pub is_typing: bool,
}
