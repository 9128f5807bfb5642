//! # LiveChat API
//!
//! Typed clients for the LiveChat Agent, Customer and Configuration APIs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use livechat_api::{ApiBuilder, ChatsFilters, Page, Token};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let agent = ApiBuilder::new()
//!         .client_id("my-client-id")
//!         .token_source(|| Some(Token::bearer("access-token", "dal")))
//!         .build_agent()?;
//!
//!     let chats = agent.list_chats(&ChatsFilters::new(), &Page::first(10)).await?;
//!     for summary in chats.chats_summary {
//!         println!("{}", summary.id);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod authorization;
pub mod client;
pub mod configuration;
pub mod customer;
pub mod error;
pub mod filters;
pub mod models;

pub use agent::AgentApi;
pub use authorization::{Token, TokenSource, TokenType};
pub use client::{Api, ApiBuilder, ApiFamily, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use configuration::ConfigurationApi;
pub use customer::CustomerApi;
pub use error::{ApiError, Result};
pub use filters::{
    property_filter, AgentsFilters, ArchivesFilters, ChatsFilters, CustomersFilters,
    DateRangeFilter, EventTypesFilter, IntegerFilter, PropertiesFilters, PropertyFilterType,
    RangeFilter, StringFilter, SurveyFilter, ThreadsFilters,
};
pub use models::{
    ChatSummary, CustomerDetails, LastEvent, ListChatsResponse, ListThreadsResponse, Page,
    ResumeChatResponse, SortOrder, StartChatResponse, ThreadSummary,
};

pub use livechat_objects as objects;

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
