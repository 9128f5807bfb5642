//! Filters for the list endpoints
//!
//! Builders take `self` by mutable reference and return it, so calls chain:
//!
//! ```rust
//! use livechat_api::filters::CustomersFilters;
//!
//! let mut filters = CustomersFilters::new();
//! filters
//!     .by_country(vec!["PL".to_string()], false)
//!     .by_chats_count(livechat_api::filters::RangeFilter::gte(1));
//! ```
//!
//! Every filter with both a values and an excluded-values side sets exactly
//! one of them; the constructors pick the side from an `inclusive` flag.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Namespace -> property name -> filter
pub type PropertiesFilters = HashMap<String, HashMap<String, PropertyFilterType>>;

/// Match on a set of strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StringFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_values: Option<Vec<String>>,
}

impl StringFilter {
    pub fn new(values: Vec<String>, inclusive: bool) -> Self {
        if inclusive {
            Self {
                values: Some(values),
                exclude_values: None,
            }
        } else {
            Self {
                values: None,
                exclude_values: Some(values),
            }
        }
    }
}

/// Match on a set of integers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegerFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_values: Option<Vec<i64>>,
}

impl IntegerFilter {
    pub fn new(values: Vec<i64>, inclusive: bool) -> Self {
        if inclusive {
            Self {
                values: Some(values),
                exclude_values: None,
            }
        } else {
            Self {
                values: None,
                exclude_values: Some(values),
            }
        }
    }
}

/// Numeric range; unset bounds are left open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RangeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eq: Option<i64>,
}

impl RangeFilter {
    pub fn eq(value: i64) -> Self {
        Self {
            eq: Some(value),
            ..Self::default()
        }
    }

    pub fn gte(value: i64) -> Self {
        Self {
            gte: Some(value),
            ..Self::default()
        }
    }

    pub fn lte(value: i64) -> Self {
        Self {
            lte: Some(value),
            ..Self::default()
        }
    }

    /// Inclusive on both ends
    pub fn between(from: i64, to: i64) -> Self {
        Self {
            gte: Some(from),
            lte: Some(to),
            ..Self::default()
        }
    }
}

/// Date range, bounds formatted as `YYYY-MM-DD` or RFC 3339
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateRangeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eq: Option<String>,
}

impl DateRangeFilter {
    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            gte: Some(from.into()),
            lte: Some(to.into()),
            ..Self::default()
        }
    }

    pub fn since(from: impl Into<String>) -> Self {
        Self {
            gte: Some(from.into()),
            ..Self::default()
        }
    }
}

/// Filter on a property or a property-like field (tags, goals, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyFilterType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_values: Option<Vec<Value>>,
    /// Match only when every listed value is present instead of any of them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_every_value: Option<bool>,
}

impl PropertyFilterType {
    /// Without values this is an existence test (`exists = inclusive`).
    /// With values it matches or excludes them depending on `inclusive`.
    pub fn new(inclusive: bool, values: Option<Vec<Value>>) -> Self {
        match values {
            None => Self {
                exists: Some(inclusive),
                ..Self::default()
            },
            Some(values) if inclusive => Self {
                values: Some(values),
                ..Self::default()
            },
            Some(values) => Self {
                exclude_values: Some(values),
                ..Self::default()
            },
        }
    }

    pub fn exists(exists: bool) -> Self {
        Self::new(exists, None)
    }

    pub fn require_every_value(mut self, require: bool) -> Self {
        self.require_every_value = Some(require);
        self
    }
}

/// Filters for `list_chats`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatsFilters {
    pub include_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_chats_without_threads: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertiesFilters>,
}

impl Default for ChatsFilters {
    fn default() -> Self {
        Self {
            include_active: true,
            include_chats_without_threads: None,
            group_ids: None,
            properties: None,
        }
    }
}

impl ChatsFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_active_chats(&mut self) -> &mut Self {
        self.include_active = false;
        self
    }

    pub fn include_chats_without_threads(&mut self, include: bool) -> &mut Self {
        self.include_chats_without_threads = Some(include);
        self
    }

    pub fn by_groups(&mut self, group_ids: Vec<i64>) -> &mut Self {
        self.group_ids = Some(group_ids);
        self
    }

    pub fn by_properties(&mut self, properties: PropertiesFilters) -> &mut Self {
        self.properties = Some(properties);
        self
    }
}

/// Filters for `list_threads`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThreadsFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl ThreadsFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_date(&mut self, from: impl Into<String>) -> &mut Self {
        self.from = Some(from.into());
        self
    }

    pub fn to_date(&mut self, to: impl Into<String>) -> &mut Self {
        self.to = Some(to.into());
        self
    }
}

/// Filters for `list_archives`
///
/// Thread IDs cannot be combined with any other criterion, so
/// [`by_threads`](Self::by_threads) resets everything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArchivesFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agents: Option<PropertyFilterType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertiesFilters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<PropertyFilterType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales: Option<PropertyFilterType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<PropertyFilterType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surveys: Option<Vec<SurveyFilter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_types: Option<EventTypesFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ids: Option<Vec<String>>,
}

/// Surveys answered in a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyFilter {
    #[serde(rename = "type")]
    pub kind: String,
    pub answer_id: String,
}

/// Event types present in a thread
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventTypesFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_every_value: Option<bool>,
}

impl ArchivesFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search
    pub fn by_query(&mut self, query: impl Into<String>) -> &mut Self {
        self.query = Some(query.into());
        self
    }

    pub fn from_date(&mut self, from: impl Into<String>) -> &mut Self {
        self.from = Some(from.into());
        self
    }

    pub fn to_date(&mut self, to: impl Into<String>) -> &mut Self {
        self.to = Some(to.into());
        self
    }

    pub fn by_agents(&mut self, agents: PropertyFilterType) -> &mut Self {
        self.agents = Some(agents);
        self
    }

    pub fn by_groups(&mut self, group_ids: Vec<i64>) -> &mut Self {
        self.group_ids = Some(group_ids);
        self
    }

    pub fn by_properties(&mut self, properties: PropertiesFilters) -> &mut Self {
        self.properties = Some(properties);
        self
    }

    pub fn by_tags(&mut self, tags: PropertyFilterType) -> &mut Self {
        self.tags = Some(tags);
        self
    }

    pub fn by_sales(&mut self, sales: PropertyFilterType) -> &mut Self {
        self.sales = Some(sales);
        self
    }

    pub fn by_goals(&mut self, goals: PropertyFilterType) -> &mut Self {
        self.goals = Some(goals);
        self
    }

    pub fn by_surveys(&mut self, surveys: Vec<SurveyFilter>) -> &mut Self {
        self.surveys = Some(surveys);
        self
    }

    pub fn by_event_types(
        &mut self,
        event_types: Vec<String>,
        inclusive: bool,
        require_every_value: bool,
    ) -> &mut Self {
        let mut filter = EventTypesFilter {
            require_every_value: Some(require_every_value),
            ..EventTypesFilter::default()
        };
        if inclusive {
            filter.values = Some(event_types);
        } else {
            filter.exclude_values = Some(event_types);
        }
        self.event_types = Some(filter);
        self
    }

    /// Look up specific threads. Clears every other criterion.
    pub fn by_threads(&mut self, thread_ids: Vec<String>) -> &mut Self {
        *self = Self {
            thread_ids: Some(thread_ids),
            ..Self::default()
        };
        self
    }
}

/// Filters for `list_customers`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomersFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<StringFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<StringFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<StringFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<StringFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chats_count: Option<RangeFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads_count: Option<RangeFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visits_count: Option<RangeFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateRangeFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_last_event_created_at: Option<DateRangeFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_last_event_created_at: Option<DateRangeFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_group_ids: Option<IntegerFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_customers_without_chats: Option<bool>,
}

impl CustomersFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_country(&mut self, countries: Vec<String>, inclusive: bool) -> &mut Self {
        self.country = Some(StringFilter::new(countries, inclusive));
        self
    }

    pub fn by_email(&mut self, emails: Vec<String>, inclusive: bool) -> &mut Self {
        self.email = Some(StringFilter::new(emails, inclusive));
        self
    }

    pub fn by_name(&mut self, names: Vec<String>, inclusive: bool) -> &mut Self {
        self.name = Some(StringFilter::new(names, inclusive));
        self
    }

    pub fn by_customer_id(&mut self, ids: Vec<String>, inclusive: bool) -> &mut Self {
        self.customer_id = Some(StringFilter::new(ids, inclusive));
        self
    }

    pub fn by_chats_count(&mut self, range: RangeFilter) -> &mut Self {
        self.chats_count = Some(range);
        self
    }

    pub fn by_threads_count(&mut self, range: RangeFilter) -> &mut Self {
        self.threads_count = Some(range);
        self
    }

    pub fn by_visits_count(&mut self, range: RangeFilter) -> &mut Self {
        self.visits_count = Some(range);
        self
    }

    pub fn by_creation_date(&mut self, range: DateRangeFilter) -> &mut Self {
        self.created_at = Some(range);
        self
    }

    pub fn by_agent_last_event_creation_date(&mut self, range: DateRangeFilter) -> &mut Self {
        self.agent_last_event_created_at = Some(range);
        self
    }

    pub fn by_customer_last_event_creation_date(&mut self, range: DateRangeFilter) -> &mut Self {
        self.customer_last_event_created_at = Some(range);
        self
    }

    pub fn by_chat_group_ids(&mut self, group_ids: Vec<i64>, inclusive: bool) -> &mut Self {
        self.chat_group_ids = Some(IntegerFilter::new(group_ids, inclusive));
        self
    }

    pub fn include_customers_without_chats(&mut self, include: bool) -> &mut Self {
        self.include_customers_without_chats = Some(include);
        self
    }
}

/// Filters for the configuration API `list_agents`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentsFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
}

impl AgentsFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_groups(&mut self, group_ids: Vec<i64>) -> &mut Self {
        self.group_ids = Some(group_ids);
        self
    }

    pub fn suspended(&mut self, suspended: bool) -> &mut Self {
        self.suspended = Some(suspended);
        self
    }
}

/// Single-entry properties filter for `namespace.name`
pub fn property_filter(
    namespace: impl Into<String>,
    name: impl Into<String>,
    filter: PropertyFilterType,
) -> PropertiesFilters {
    let mut inner = HashMap::new();
    inner.insert(name.into(), filter);
    let mut outer = HashMap::new();
    outer.insert(namespace.into(), inner);
    outer
}
