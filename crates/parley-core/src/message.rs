//! Conversation data model

use parley_client::{Answer, MenuOption};
use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single entry in the conversation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    /// Quick replies offered with this message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_options: Option<Vec<MenuOption>>,
    /// Where the backend took the answer from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub is_error: bool,
    /// Free-text hints the user may type next
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Backend declared the conversation finished
    #[serde(default)]
    pub ends_chat: bool,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    /// Create a bot message
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    /// Create an error-flagged bot message
    pub fn bot_error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::bot(text)
        }
    }

    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            menu_options: None,
            source: None,
            is_error: false,
            suggestions: Vec::new(),
            ends_chat: false,
        }
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Menu options, or an empty slice
    pub fn options(&self) -> &[MenuOption] {
        self.menu_options.as_deref().unwrap_or_default()
    }
}

impl From<Answer> for Message {
    fn from(answer: Answer) -> Self {
        Self {
            menu_options: answer.menu_options,
            source: answer.source,
            suggestions: answer.suggestions,
            ends_chat: answer.end_chat,
            ..Self::bot(answer.text)
        }
    }
}

/// Read-only view of the widget state handed to the rendering layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub menu_visible: bool,
    pub loading: bool,
    pub unread_count: usize,
    pub widget_open: bool,
}

impl ConversationState {
    /// Options of the most recent message that offered a menu
    pub fn active_menu(&self) -> Option<&[MenuOption]> {
        if !self.menu_visible {
            return None;
        }
        self.messages
            .iter()
            .rev()
            .find(|m| !m.options().is_empty())
            .map(|m| m.options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_answer_keeps_metadata() {
        let msg = Message::from(Answer {
            text: "R$99/mês".into(),
            source: Some("catalog".into()),
            suggestions: vec!["menu".into()],
            ..Default::default()
        });
        assert!(msg.is_bot());
        assert!(!msg.is_error);
        assert_eq!(msg.source.as_deref(), Some("catalog"));
        assert_eq!(msg.suggestions, vec!["menu"]);
        assert!(msg.options().is_empty());
    }

    #[test]
    fn test_serializes_lowercase_sender() {
        let json = serde_json::to_value(Message::user("oi")).unwrap();
        assert_eq!(json["sender"], "user");
        assert!(json.get("menu_options").is_none());
    }

    #[test]
    fn test_active_menu_requires_visibility() {
        let mut with_menu = Message::bot("Escolha");
        with_menu.menu_options = Some(vec![MenuOption::new("/cursos", "Cursos")]);

        let mut state = ConversationState {
            messages: vec![with_menu, Message::user("/cursos")],
            ..Default::default()
        };
        assert!(state.active_menu().is_none());

        state.menu_visible = true;
        assert_eq!(state.active_menu().map(<[_]>::len), Some(1));
    }
}
