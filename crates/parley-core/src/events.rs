//! Conversation event types

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Which network intent a dispatch belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    SendMessage,
    SelectMenuOption,
    RequestMenu,
}

/// Events emitted whenever the controller mutates state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    /// A message was appended at `index`
    MessageAppended { index: usize, message: Message },

    /// History was wiped
    Cleared,

    /// First exchange started or last exchange settled
    LoadingChanged { loading: bool },

    /// Quick-reply menu shown or hidden
    MenuVisibilityChanged { visible: bool },

    /// Unread counter moved
    UnreadChanged { count: usize },

    /// Widget expanded or collapsed
    WidgetToggled { open: bool },

    /// Intent refused because another exchange is pending
    DispatchRejected { intent: IntentKind },
}

impl ConversationEvent {
    /// Whether this event changes what is on screen
    pub fn is_visible_change(&self) -> bool {
        !matches!(self, ConversationEvent::DispatchRejected { .. })
    }
}
