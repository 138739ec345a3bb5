//! Unread bot-message counting while the widget is collapsed

use crate::message::Message;

/// Counts bot messages that arrive while the widget is closed.
///
/// Keeps an explicit cursor to the first message not yet looked at, so the
/// count never has to be back-solved from the history length.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnreadTracker {
    cursor: usize,
    count: usize,
}

impl UnreadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Account for messages appended since the last call.
    ///
    /// Returns true if the count changed.
    pub fn observe(&mut self, messages: &[Message], widget_open: bool) -> bool {
        let start = self.cursor.min(messages.len());
        let fresh = if widget_open {
            0
        } else {
            messages[start..].iter().filter(|m| m.is_bot()).count()
        };
        self.cursor = messages.len();
        self.count += fresh;
        fresh > 0
    }

    /// Widget went closed -> open. Returns true if the count changed.
    pub fn open(&mut self, len: usize) -> bool {
        let changed = self.count != 0;
        self.count = 0;
        self.cursor = len;
        changed
    }

    /// Widget went open -> closed
    pub fn close(&mut self, len: usize) {
        self.cursor = len;
    }

    /// History was cleared; the count is kept
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(senders: &str) -> Vec<Message> {
        senders
            .chars()
            .map(|c| match c {
                'u' => Message::user("hi"),
                _ => Message::bot("hello"),
            })
            .collect()
    }

    #[test]
    fn test_counts_bot_messages_while_closed() {
        let mut tracker = UnreadTracker::new();
        let mut messages = Vec::new();
        for n in 1..=12 {
            messages.push(Message::bot(format!("reply {n}")));
            tracker.observe(&messages, false);
            assert_eq!(tracker.count(), n);
        }
        assert!(tracker.open(messages.len()));
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn test_user_messages_do_not_count() {
        let mut tracker = UnreadTracker::new();
        let messages = history("ubub");
        assert!(tracker.observe(&messages, false));
        assert_eq!(tracker.count(), 2);
    }

    #[test]
    fn test_open_widget_ignores_arrivals() {
        let mut tracker = UnreadTracker::new();
        let messages = history("ub");
        assert!(!tracker.observe(&messages, true));
        assert_eq!(tracker.count(), 0);
        assert_eq!(tracker.cursor(), 2);
    }

    #[test]
    fn test_close_only_counts_later_arrivals() {
        let mut tracker = UnreadTracker::new();
        let mut messages = history("ubb");
        tracker.observe(&messages, true);
        tracker.close(messages.len());

        messages.push(Message::bot("late"));
        tracker.observe(&messages, false);
        assert_eq!(tracker.count(), 1);
    }

    #[test]
    fn test_rapid_toggling_does_not_drift() {
        let mut tracker = UnreadTracker::new();
        let mut messages = Vec::new();
        for _ in 0..5 {
            messages.push(Message::bot("x"));
            tracker.observe(&messages, false);
            tracker.open(messages.len());
            tracker.close(messages.len());
        }
        assert_eq!(tracker.count(), 0);

        messages.push(Message::bot("y"));
        messages.push(Message::bot("z"));
        tracker.observe(&messages, false);
        assert_eq!(tracker.count(), 2);
    }

    #[test]
    fn test_rewind_after_clear_keeps_count() {
        let mut tracker = UnreadTracker::new();
        let mut messages = history("bb");
        tracker.observe(&messages, false);

        messages.clear();
        tracker.rewind();
        tracker.observe(&messages, false);
        assert_eq!(tracker.count(), 2);

        messages.push(Message::bot("after clear"));
        tracker.observe(&messages, false);
        assert_eq!(tracker.count(), 3);
    }
}
