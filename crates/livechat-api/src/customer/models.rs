//! Customer API request and response shapes

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Availability of a group for new chats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    Online,
    Offline,
    OnlineForQueue,
    #[serde(other)]
    Unknown,
}

/// Which form of a group to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    Prechat,
    Postchat,
    AskForEmail,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetFormResponse {
    #[serde(default)]
    pub form: Option<Form>,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: String,
    #[serde(default)]
    pub fields: Vec<Value>,
}

/// Preview data of a URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_original_width: Option<u32>,
    #[serde(default)]
    pub image_original_height: Option<u32>,
    #[serde(default)]
    pub image_width: Option<u32>,
    #[serde(default)]
    pub image_height: Option<u32>,
}

#[derive(Serialize)]
pub(crate) struct SneakPeekRequest<'a> {
    pub chat_id: &'a str,
    pub sneak_peek_text: &'a str,
}

#[derive(Serialize)]
pub(crate) struct SessionFieldsRequest<'a> {
    pub session_fields: &'a [HashMap<String, String>],
}

#[derive(Serialize)]
pub(crate) struct GroupStatusesRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<&'a [i64]>,
}

impl<'a> GroupStatusesRequest<'a> {
    /// Empty `group_ids` asks for every group
    pub fn new(group_ids: &'a [i64]) -> Self {
        if group_ids.is_empty() {
            Self {
                all: Some(true),
                group_ids: None,
            }
        } else {
            Self {
                all: None,
                group_ids: Some(group_ids),
            }
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct GroupStatusesResponse {
    #[serde(default)]
    pub groups_status: HashMap<i64, GroupStatus>,
}

#[derive(Serialize)]
pub(crate) struct UrlInfoRequest<'a> {
    pub url: &'a str,
}

#[derive(Serialize)]
pub(crate) struct GetFormRequest {
    pub group_id: i64,
    #[serde(rename = "type")]
    pub kind: FormType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_statuses_request() {
        assert_eq!(
            serde_json::to_value(GroupStatusesRequest::new(&[])).unwrap(),
            json!({"all": true})
        );
        assert_eq!(
            serde_json::to_value(GroupStatusesRequest::new(&[1, 2])).unwrap(),
            json!({"group_ids": [1, 2]})
        );
    }

    #[test]
    fn test_group_statuses_response() {
        let response: GroupStatusesResponse = serde_json::from_value(json!({
            "groups_status": {"0": "online", "3": "online_for_queue", "5": "busy"}
        }))
        .unwrap();

        assert_eq!(response.groups_status[&0], GroupStatus::Online);
        assert_eq!(response.groups_status[&3], GroupStatus::OnlineForQueue);
        assert_eq!(response.groups_status[&5], GroupStatus::Unknown);
    }
}
