//! Collapsed chat bubble with the unread badge

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// Text for the unread badge, `None` when there is nothing unread
pub fn badge_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        1..=9 => Some(count.to_string()),
        _ => Some("9+".to_string()),
    }
}

/// The launcher shown while the widget is collapsed
pub struct Launcher<'a> {
    title: &'a str,
    unread: usize,
    theme: &'a Theme,
}

impl<'a> Launcher<'a> {
    pub fn new(title: &'a str, unread: usize, theme: &'a Theme) -> Self {
        Self {
            title,
            unread,
            theme,
        }
    }

    /// Width the bubble needs for its title and badge
    pub fn width(&self) -> u16 {
        let badge = badge_label(self.unread).map(|b| b.len() + 3).unwrap_or(0);
        (self.title.chars().count() + badge + 6) as u16
    }
}

impl Widget for Launcher<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.accent_style());

        let mut spans = vec![Span::styled(
            format!(" 💬 {}", self.title),
            self.theme.accent_bold(),
        )];
        if let Some(badge) = badge_label(self.unread) {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!(" {} ", badge), self.theme.badge_style()));
        }

        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_label() {
        assert_eq!(badge_label(0), None);
        assert_eq!(badge_label(1).as_deref(), Some("1"));
        assert_eq!(badge_label(9).as_deref(), Some("9"));
        assert_eq!(badge_label(10).as_deref(), Some("9+"));
        assert_eq!(badge_label(250).as_deref(), Some("9+"));
    }

    #[test]
    fn test_badge_widens_bubble() {
        let theme = Theme::dark();
        let quiet = Launcher::new("Chat", 0, &theme).width();
        assert!(Launcher::new("Chat", 12, &theme).width() > quiet);
    }
}
