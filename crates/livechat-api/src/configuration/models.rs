//! Configuration API request and response shapes

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::filters::AgentsFilters;

// ===== Properties =====

/// Definition of a property in a namespace owned by a client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner_client_id: String,
    /// Value type: `int`, `string`, `bool` or `tokenized_string`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Per location (`chat`, `thread`, `event`) access of each role
    #[serde(default)]
    pub access: HashMap<String, PropertyAccess>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<PropertyRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAccess {
    #[serde(default)]
    pub agent: Vec<String>,
    #[serde(default)]
    pub customer: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRange {
    pub from: i64,
    pub to: i64,
}

/// Namespace -> property name -> definition
pub type PropertiesConfig = HashMap<String, HashMap<String, PropertyConfig>>;

#[derive(Serialize)]
pub(crate) struct PropertyNameRequest<'a> {
    pub name: &'a str,
    pub owner_client_id: &'a str,
}

#[derive(Serialize)]
pub(crate) struct PublishPropertyRequest<'a> {
    pub name: &'a str,
    pub owner_client_id: &'a str,
    pub access_type: Vec<&'static str>,
}

#[derive(Serialize)]
pub(crate) struct OwnerRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_client_id: Option<&'a str>,
}

// ===== Agents =====

/// Agent account. Only set fields are sent on create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chats_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awaiting_approval: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<GroupMembership>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_subscriptions: Option<Vec<String>>,
}

/// Routing priority inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupPriority {
    First,
    Normal,
    Last,
    Supervisor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembership {
    pub id: i64,
    pub priority: GroupPriority,
}

#[derive(Serialize)]
pub(crate) struct GetAgentRequest<'a> {
    pub id: &'a str,
    #[serde(skip_serializing_if = "no_fields")]
    pub fields: &'a [&'a str],
}

#[derive(Serialize)]
pub(crate) struct ListAgentsRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<&'a AgentsFilters>,
    #[serde(skip_serializing_if = "no_fields")]
    pub fields: &'a [&'a str],
}

// ===== Groups =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub language_code: Option<String>,
    /// Agent ID -> priority
    #[serde(default)]
    pub agent_priorities: HashMap<String, GroupPriority>,
    #[serde(default)]
    pub routing_status: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct GroupRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_priorities: Option<&'a HashMap<String, GroupPriority>>,
}

#[derive(Serialize)]
pub(crate) struct GroupIdRequest<'a> {
    pub id: i64,
    #[serde(skip_serializing_if = "no_fields")]
    pub fields: &'a [&'a str],
}

#[derive(Serialize)]
pub(crate) struct FieldsRequest<'a> {
    #[serde(skip_serializing_if = "no_fields")]
    pub fields: &'a [&'a str],
}

#[derive(Deserialize)]
pub(crate) struct CreateGroupResponse {
    pub id: i64,
}

// ===== Webhooks =====

/// Scope of a webhook registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookType {
    #[default]
    License,
    Bot,
}

/// Webhook registration: `action` is delivered to `url` with `secret_key`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookRegistration {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub action: String,
    pub secret_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner_client_id: String,
    #[serde(rename = "type", default)]
    pub kind: WebhookType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<WebhookFilters>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_data: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_my_chats: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_member_ids: Option<ChatMemberIds>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMemberIds {
    AgentsAny(Vec<String>),
    AgentsExclude(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisteredWebhook {
    pub id: String,
    #[serde(flatten)]
    pub registration: WebhookRegistration,
}

#[derive(Serialize)]
pub(crate) struct UnregisterWebhookRequest<'a> {
    pub id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_client_id: Option<&'a str>,
}

// ===== Bots =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bot {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_group_priority: Option<GroupPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chats_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<GroupMembership>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_client_id: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct ListBotsRequest<'a> {
    pub all: bool,
    #[serde(skip_serializing_if = "no_fields")]
    pub fields: &'a [&'a str],
}

fn no_fields(fields: &&[&str]) -> bool {
    fields.is_empty()
}

#[derive(Serialize)]
pub(crate) struct IdRequest<'a> {
    pub id: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct CreatedResponse {
    pub id: String,
}
