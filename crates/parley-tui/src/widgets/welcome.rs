//! Empty-conversation panel

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

/// Shown in place of the message list before the first message
pub struct Welcome<'a> {
    endpoint: &'a str,
    theme: &'a Theme,
}

impl<'a> Welcome<'a> {
    pub fn new(endpoint: &'a str, theme: &'a Theme) -> Self {
        Self { endpoint, theme }
    }
}

impl Widget for Welcome<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("Hi! How can we help?", theme.accent_bold())),
            Line::from(""),
            Line::from(Span::styled(
                "Type a message and press Enter.",
                theme.base_style(),
            )),
            Line::from(Span::styled(
                "Ctrl+E menu · Ctrl+L clear · Ctrl+T theme · Esc collapse",
                theme.dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(self.endpoint.to_string(), theme.dim_style())),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
