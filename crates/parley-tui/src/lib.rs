//! parley-tui: terminal widgets for the chat widget
//!
//! Widgets render a [`parley_core::ConversationState`] snapshot and never
//! mutate it; key presses are turned into [`input::Action`]s for the host to
//! map onto controller intents.

pub mod input;
pub mod theme;
pub mod widgets;

pub use theme::Theme;
