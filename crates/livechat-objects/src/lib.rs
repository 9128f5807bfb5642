//! Data model of the LiveChat platform
//!
//! Chats, threads, events and users as they appear in API responses and
//! webhook payloads. Events and users are tagged unions on the wire: the base
//! fields are always decoded, while the fields specific to one variant are
//! kept aside and only interpreted when a typed view is requested.
//!
//! ```rust
//! use livechat_objects::Event;
//!
//! let event: Event = serde_json::from_str(
//!     r#"{"id":"e1","type":"message","text":"Hello","author_id":"a1"}"#,
//! ).unwrap();
//!
//! assert_eq!(event.as_message().unwrap().text, "Hello");
//! assert!(event.as_file().is_none());
//! ```

pub mod chat;
pub mod error;
pub mod event;
pub mod properties;
pub mod user;

pub use chat::{Access, Chat, InitialChat, InitialThread, Thread};
pub use error::{ValidationError, ValidationResult};
pub use event::{
    CustomEvent, Event, EventType, File, FilledForm, FilledFormField, Message, Postback,
    Recipients, RichMessage, RichMessageButton, RichMessageElement, RichMessageImage,
    SystemMessage,
};
pub use properties::{DeletedProperties, Properties};
pub use user::{Agent, Customer, Geolocation, Statistics, User, UserType, Visit, VisitedPage};
