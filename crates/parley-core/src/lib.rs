//! parley-core: conversation controller
//!
//! Owns the message history, menu visibility, loading flag and unread
//! counter of the chat widget, and turns UI intents into exchanges with the
//! backend.

pub mod config;
pub mod controller;
pub mod events;
pub mod message;
pub mod store;
pub mod unread;

pub use config::{ControllerConfig, DispatchPolicy, Fallbacks};
pub use controller::{ConversationController, Dispatch, Outcome};
pub use events::{ConversationEvent, IntentKind};
pub use message::{ConversationState, Message, Sender};
pub use parley_client::MenuOption;
pub use store::ConversationStore;
pub use unread::UnreadTracker;
