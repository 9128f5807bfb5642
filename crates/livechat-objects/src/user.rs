//! Chat participants
//!
//! A [`User`] is either an agent or a customer, told apart by its `type`
//! field. [`Agent`] and [`Customer`] extend the base user with the fields only
//! that kind of participant carries.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// User discriminator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserType {
    Agent,
    Customer,
    Other(String),
}

impl UserType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Agent => "agent",
            Self::Customer => "customer",
            Self::Other(other) => other,
        }
    }
}

impl Default for UserType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for UserType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "agent" => Self::Agent,
            "customer" => Self::Customer,
            _ => Self::Other(value),
        }
    }
}

impl From<UserType> for String {
    fn from(value: UserType) -> Self {
        match value {
            UserType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every participant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: UserType,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub avatar: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default)]
    pub present: bool,
    #[serde(
        rename = "events_seen_up_to",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub session_fields: Vec<HashMap<String, String>>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl User {
    pub fn new(id: impl Into<String>, kind: UserType) -> Self {
        Self {
            id: id.into(),
            kind,
            ..Self::default()
        }
    }

    /// Variant-specific field, still undecoded
    pub fn raw_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Agent view, or `None` for customers and malformed agents
    pub fn as_agent(&self) -> Option<Agent> {
        if self.kind != UserType::Agent {
            return None;
        }
        Agent::try_from(self.clone()).ok()
    }

    /// Customer view, or `None` for agents and malformed customers
    pub fn as_customer(&self) -> Option<Customer> {
        if self.kind != UserType::Customer {
            return None;
        }
        Customer::try_from(self.clone()).ok()
    }

    fn decode_fields<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(Value::Object(self.fields.clone()))
    }
}

/// Agent participant
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub user: User,
    pub routing_status: Option<String>,
}

#[derive(Deserialize)]
struct AgentFields {
    #[serde(default)]
    routing_status: Option<String>,
}

impl TryFrom<User> for Agent {
    type Error = serde_json::Error;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        let fields: AgentFields = user.decode_fields()?;
        Ok(Self {
            user,
            routing_status: fields.routing_status,
        })
    }
}

impl Agent {
    pub fn id(&self) -> &str {
        &self.user.id
    }
}

impl<'de> Deserialize<'de> for Agent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let user = User::deserialize(deserializer)?;
        Agent::try_from(user).map_err(D::Error::custom)
    }
}

/// Written out as the underlying user, which still holds every wire field.
impl Serialize for Agent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.user.serialize(serializer)
    }
}

/// Customer participant
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub user: User,
    pub last_visit: Option<Visit>,
    pub statistics: Option<Statistics>,
    pub agent_last_event_created_at: Option<DateTime<Utc>>,
    pub customer_last_event_created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct CustomerFields {
    #[serde(default)]
    last_visit: Option<Visit>,
    #[serde(default)]
    statistics: Option<Statistics>,
    #[serde(default)]
    agent_last_event_created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    customer_last_event_created_at: Option<DateTime<Utc>>,
}

impl TryFrom<User> for Customer {
    type Error = serde_json::Error;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        let fields: CustomerFields = user.decode_fields()?;
        Ok(Self {
            user,
            last_visit: fields.last_visit,
            statistics: fields.statistics,
            agent_last_event_created_at: fields.agent_last_event_created_at,
            customer_last_event_created_at: fields.customer_last_event_created_at,
        })
    }
}

impl Customer {
    pub fn id(&self) -> &str {
        &self.user.id
    }
}

impl<'de> Deserialize<'de> for Customer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let user = User::deserialize(deserializer)?;
        Customer::try_from(user).map_err(D::Error::custom)
    }
}

impl Serialize for Customer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.user.serialize(serializer)
    }
}

/// Most recent website visit of a customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub referrer: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub geolocation: Option<Geolocation>,
    #[serde(default)]
    pub last_pages: Vec<VisitedPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitedPage {
    #[serde(default)]
    pub opened_at: Option<DateTime<Utc>>,
    pub url: String,
    #[serde(default)]
    pub title: String,
}

/// Lifetime counters of a customer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub chats_count: u64,
    pub threads_count: u64,
    pub visits_count: u64,
    pub page_views_count: u64,
    pub greetings_shown_count: u64,
    pub greetings_accepted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn customer_json() -> Value {
        json!({
            "id": "b7eff798-f8df-4364-8059-649c35c9ed0c",
            "type": "customer",
            "name": "Thomas Anderson",
            "email": "t.anderson@example.com",
            "avatar": "https://example.com/avatars/1.jpg",
            "present": true,
            "events_seen_up_to": "2019-12-05T07:27:13.010000Z",
            "last_visit": {
                "started_at": "2019-12-05T07:25:00.000000Z",
                "referrer": "https://google.com",
                "ip": "1.2.3.4",
                "geolocation": {"country": "Poland", "country_code": "PL", "city": "Wroclaw"},
                "last_pages": [{"url": "https://example.com/pricing", "title": "Pricing"}]
            },
            "statistics": {"chats_count": 3, "threads_count": 5, "visits_count": 9},
            "agent_last_event_created_at": "2019-12-05T07:27:10.000000Z",
            "customer_last_event_created_at": "2019-12-05T07:27:09.000000Z"
        })
    }

    #[test]
    fn test_customer_view() {
        let user: User = serde_json::from_value(customer_json()).unwrap();
        assert!(user.as_agent().is_none());

        let customer = user.as_customer().expect("customer view");
        assert_eq!(customer.user.id, user.id);
        assert_eq!(customer.user.name, user.name);
        assert_eq!(customer.user.email, user.email);
        assert_eq!(customer.user.present, user.present);

        let stats = customer.statistics.unwrap();
        assert_eq!(stats.chats_count, 3);
        assert_eq!(stats.page_views_count, 0);

        let visit = customer.last_visit.unwrap();
        assert_eq!(visit.ip.as_deref(), Some("1.2.3.4"));
        assert_eq!(visit.last_pages[0].title, "Pricing");
        assert_eq!(
            visit.geolocation.and_then(|g| g.country_code).as_deref(),
            Some("PL")
        );
        assert!(customer.agent_last_event_created_at.is_some());
    }

    #[test]
    fn test_agent_view() {
        let user: User = serde_json::from_value(json!({
            "id": "smith@example.com",
            "type": "agent",
            "name": "Agent Smith",
            "present": true,
            "routing_status": "accepting_chats"
        }))
        .unwrap();

        assert!(user.as_customer().is_none());
        let agent = user.as_agent().unwrap();
        assert_eq!(agent.id(), "smith@example.com");
        assert_eq!(agent.routing_status.as_deref(), Some("accepting_chats"));
    }

    #[test]
    fn test_malformed_variant_fields() {
        let user: User = serde_json::from_value(json!({
            "id": "c1",
            "type": "customer",
            "statistics": "lots"
        }))
        .unwrap();

        assert!(user.as_customer().is_none());
        assert!(Customer::try_from(user).is_err());
    }

    #[test]
    fn test_unknown_type() {
        let user: User = serde_json::from_value(json!({"id": "b1", "type": "bot"})).unwrap();
        assert_eq!(user.kind, UserType::Other("bot".to_string()));
        assert!(user.as_agent().is_none());
        assert!(user.as_customer().is_none());
    }

    #[test]
    fn test_customer_serializes_as_user() {
        let customer: Customer = serde_json::from_value(customer_json()).unwrap();
        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["statistics"]["chats_count"], 3);
        assert_eq!(value["type"], "customer");
    }
}
