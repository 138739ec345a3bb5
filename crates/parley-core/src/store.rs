//! Conversation history and menu visibility

use crate::message::Message;

/// Ordered message history plus the menu flag.
///
/// Append-only; [`ConversationStore::clear`] is the only way to shrink it.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    menu_visible: bool,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, returning its index
    pub fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    /// Drop all messages and hide the menu
    pub fn clear(&mut self) {
        self.messages.clear();
        self.menu_visible = false;
    }

    /// Set menu visibility, returning true if it changed
    pub fn set_menu_visible(&mut self, visible: bool) -> bool {
        let changed = self.menu_visible != visible;
        self.menu_visible = visible;
        changed
    }

    pub fn menu_visible(&self) -> bool {
        self.menu_visible
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut store = ConversationStore::new();
        assert_eq!(store.push(Message::user("a")), 0);
        assert_eq!(store.push(Message::bot("b")), 1);
        let texts: Vec<_> = store.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["a", "b"]);
        assert_eq!(store.last().map(|m| m.text.as_str()), Some("b"));
    }

    #[test]
    fn test_clear_resets_messages_and_menu() {
        let mut store = ConversationStore::new();
        store.push(Message::bot("menu"));
        store.set_menu_visible(true);

        store.clear();

        assert!(store.is_empty());
        assert!(!store.menu_visible());
    }

    #[test]
    fn test_set_menu_visible_reports_change() {
        let mut store = ConversationStore::new();
        assert!(!store.set_menu_visible(false));
        assert!(store.set_menu_visible(true));
        assert!(!store.set_menu_visible(true));
    }
}
