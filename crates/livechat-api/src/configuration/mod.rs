//! Configuration API
//!
//! License setup: property definitions, agents, groups, webhooks and bots.
//! Files cannot be uploaded through this API.

mod models;

pub use models::*;

use std::collections::HashMap;
use tracing::instrument;

use crate::client::Api;
use crate::error::Result;
use crate::filters::AgentsFilters;

/// Client for the Configuration API
#[derive(Debug, Clone)]
pub struct ConfigurationApi {
    api: Api,
}

impl From<Api> for ConfigurationApi {
    fn from(api: Api) -> Self {
        Self { api }
    }
}

impl ConfigurationApi {
    pub fn api(&self) -> &Api {
        &self.api
    }

    // ===== Properties =====

    /// Register a property in the namespace of `property.owner_client_id`
    #[instrument(skip(self, property), fields(name = %property.name))]
    pub async fn register_property(&self, property: &PropertyConfig) -> Result<()> {
        self.api.call_empty("register_property", property).await
    }

    #[instrument(skip(self))]
    pub async fn unregister_property(&self, name: &str, owner_client_id: &str) -> Result<()> {
        let request = PropertyNameRequest {
            name,
            owner_client_id,
        };
        self.api.call_empty("unregister_property", &request).await
    }

    /// Make a property visible to other clients of the license
    #[instrument(skip(self))]
    pub async fn publish_property(
        &self,
        name: &str,
        owner_client_id: &str,
        read: bool,
        write: bool,
    ) -> Result<()> {
        let mut access_type = Vec::new();
        if read {
            access_type.push("read");
        }
        if write {
            access_type.push("write");
        }
        let request = PublishPropertyRequest {
            name,
            owner_client_id,
            access_type,
        };
        self.api.call_empty("publish_property", &request).await
    }

    /// Properties owned by `owner_client_id`, or by the caller when `None`
    #[instrument(skip(self))]
    pub async fn list_properties(&self, owner_client_id: Option<&str>) -> Result<PropertiesConfig> {
        self.api
            .call("list_properties", &OwnerRequest { owner_client_id })
            .await
    }

    // ===== Agents =====

    /// Create an agent account and return its ID
    #[instrument(skip(self, agent), fields(agent_id = %agent.id))]
    pub async fn create_agent(&self, agent: &AgentAccount) -> Result<String> {
        let response: CreatedResponse = self.api.call("create_agent", agent).await?;
        Ok(response.id)
    }

    /// Get an agent; `fields` selects optional properties to include
    #[instrument(skip(self))]
    pub async fn get_agent(&self, agent_id: &str, fields: &[&str]) -> Result<AgentAccount> {
        self.api
            .call("get_agent", &GetAgentRequest { id: agent_id, fields })
            .await
    }

    #[instrument(skip(self, filters))]
    pub async fn list_agents(
        &self,
        filters: Option<&AgentsFilters>,
        fields: &[&str],
    ) -> Result<Vec<AgentAccount>> {
        self.api
            .call("list_agents", &ListAgentsRequest { filters, fields })
            .await
    }

    #[instrument(skip(self, agent), fields(agent_id = %agent.id))]
    pub async fn update_agent(&self, agent: &AgentAccount) -> Result<()> {
        self.api.call_empty("update_agent", agent).await
    }

    #[instrument(skip(self))]
    pub async fn delete_agent(&self, agent_id: &str) -> Result<()> {
        self.api
            .call_empty("delete_agent", &IdRequest { id: agent_id })
            .await
    }

    #[instrument(skip(self))]
    pub async fn suspend_agent(&self, agent_id: &str) -> Result<()> {
        self.api
            .call_empty("suspend_agent", &IdRequest { id: agent_id })
            .await
    }

    #[instrument(skip(self))]
    pub async fn unsuspend_agent(&self, agent_id: &str) -> Result<()> {
        self.api
            .call_empty("unsuspend_agent", &IdRequest { id: agent_id })
            .await
    }

    // ===== Groups =====

    /// Create a group and return its ID
    #[instrument(skip(self, agent_priorities))]
    pub async fn create_group(
        &self,
        name: &str,
        language_code: Option<&str>,
        agent_priorities: &HashMap<String, GroupPriority>,
    ) -> Result<i64> {
        let request = GroupRequest {
            id: None,
            name: Some(name),
            language_code,
            agent_priorities: Some(agent_priorities),
        };
        let response: CreateGroupResponse = self.api.call("create_group", &request).await?;
        Ok(response.id)
    }

    /// Update the given attributes of a group; `None` leaves one unchanged
    #[instrument(skip(self, agent_priorities))]
    pub async fn update_group(
        &self,
        group_id: i64,
        name: Option<&str>,
        language_code: Option<&str>,
        agent_priorities: Option<&HashMap<String, GroupPriority>>,
    ) -> Result<()> {
        let request = GroupRequest {
            id: Some(group_id),
            name,
            language_code,
            agent_priorities,
        };
        self.api.call_empty("update_group", &request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_group(&self, group_id: i64) -> Result<()> {
        let request = GroupIdRequest {
            id: group_id,
            fields: &[],
        };
        self.api.call_empty("delete_group", &request).await
    }

    #[instrument(skip(self))]
    pub async fn get_group(&self, group_id: i64, fields: &[&str]) -> Result<Group> {
        let request = GroupIdRequest {
            id: group_id,
            fields,
        };
        self.api.call("get_group", &request).await
    }

    #[instrument(skip(self))]
    pub async fn list_groups(&self, fields: &[&str]) -> Result<Vec<Group>> {
        self.api
            .call("list_groups", &FieldsRequest { fields })
            .await
    }

    // ===== Webhooks =====

    /// Register a webhook and return its ID
    #[instrument(skip(self, webhook), fields(action = %webhook.action))]
    pub async fn register_webhook(&self, webhook: &WebhookRegistration) -> Result<String> {
        let response: CreatedResponse = self.api.call("register_webhook", webhook).await?;
        Ok(response.id)
    }

    #[instrument(skip(self))]
    pub async fn list_webhooks(
        &self,
        owner_client_id: Option<&str>,
    ) -> Result<Vec<RegisteredWebhook>> {
        self.api
            .call("list_webhooks", &OwnerRequest { owner_client_id })
            .await
    }

    #[instrument(skip(self))]
    pub async fn unregister_webhook(
        &self,
        webhook_id: &str,
        owner_client_id: Option<&str>,
    ) -> Result<()> {
        let request = UnregisterWebhookRequest {
            id: webhook_id,
            owner_client_id,
        };
        self.api.call_empty("unregister_webhook", &request).await
    }

    // ===== Bots =====

    /// Create a bot agent and return its ID
    #[instrument(skip(self, bot), fields(name = %bot.name))]
    pub async fn create_bot(&self, bot: &Bot) -> Result<String> {
        let response: CreatedResponse = self.api.call("create_bot", bot).await?;
        Ok(response.id)
    }

    #[instrument(skip(self))]
    pub async fn delete_bot(&self, bot_id: &str) -> Result<()> {
        self.api
            .call_empty("delete_bot", &IdRequest { id: bot_id })
            .await
    }

    /// Bots of the caller, or of every client of the license when `all`
    #[instrument(skip(self))]
    pub async fn list_bots(&self, all: bool, fields: &[&str]) -> Result<Vec<Bot>> {
        self.api
            .call("list_bots", &ListBotsRequest { all, fields })
            .await
    }
}
