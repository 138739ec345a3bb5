//! Conversation transcript

use crate::theme::Theme;
use parley_core::{Message, Sender};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Render messages into wrapped, indented lines
fn message_lines(messages: &[Message], theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let content_width = width.saturating_sub(2).max(1);
    let mut lines = Vec::new();

    for msg in messages {
        let (header, header_style) = match msg.sender {
            Sender::User => ("▶ You", theme.accent_bold()),
            Sender::Bot if msg.is_error => ("◀ Bot", theme.error_style().add_modifier(Modifier::BOLD)),
            Sender::Bot => ("◀ Bot", theme.bot_bold()),
        };
        lines.push(Line::from(Span::styled(header, header_style)));

        let body_style = if msg.is_error {
            theme.error_style()
        } else {
            theme.base_style()
        };
        for paragraph in msg.text.lines() {
            for row in textwrap::wrap(paragraph, content_width) {
                lines.push(Line::from(Span::styled(format!("  {}", row), body_style)));
            }
        }

        if msg.is_bot() && !msg.is_error {
            if let Some(source) = &msg.source {
                lines.push(Line::from(Span::styled(
                    format!("  Source: {}", source),
                    theme.dim_style().add_modifier(Modifier::ITALIC),
                )));
            }
            let options = msg.options();
            if !options.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  ☰ {} options", options.len()),
                    theme.dim_style(),
                )));
            }
            if !msg.suggestions.is_empty() {
                let joined = msg.suggestions.join(" · ");
                for row in textwrap::wrap(&format!("Try: {}", joined), content_width) {
                    lines.push(Line::from(Span::styled(format!("  {}", row), theme.dim_style())));
                }
            }
            if msg.ends_chat {
                lines.push(Line::from(Span::styled(
                    "  ── conversation ended ──",
                    theme.dim_style(),
                )));
            }
        }

        lines.push(Line::from(""));
    }

    lines
}

/// Total rendered height of `messages` at `width`
pub fn content_height(messages: &[Message], width: usize) -> usize {
    message_lines(messages, &Theme::default(), width).len()
}

/// Scrollable list of conversation messages
pub struct MessageList<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    scroll: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            scroll: 0,
        }
    }

    /// First line to show
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for MessageList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let visible: Vec<Line> = message_lines(self.messages, self.theme, area.width as usize)
            .into_iter()
            .skip(self.scroll)
            .take(area.height as usize)
            .collect();

        Paragraph::new(visible).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::MenuOption;

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_bot_metadata_lines() {
        let mut answer = Message::bot("Temos três planos.");
        answer.source = Some("pricing.md".into());
        answer.menu_options = Some(vec![
            MenuOption::new("basic", "Básico"),
            MenuOption::new("pro", "Pro"),
        ]);
        let lines = text_of(&message_lines(&[answer], &Theme::dark(), 40));

        assert_eq!(lines[0], "◀ Bot");
        assert!(lines.contains(&"  Source: pricing.md".to_string()));
        assert!(lines.contains(&"  ☰ 2 options".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_error_hides_source() {
        let mut failure = Message::bot_error("Falha no servidor");
        failure.source = Some("ignored".into());
        let lines = text_of(&message_lines(&[failure], &Theme::dark(), 40));
        assert!(!lines.iter().any(|l| l.contains("Source")));
    }

    #[test]
    fn test_height_grows_with_wrapping() {
        let long = vec![Message::user("palavra ".repeat(20))];
        assert!(content_height(&long, 20) > content_height(&long, 80));
        assert_eq!(content_height(&[], 80), 0);
    }
}
