//! Color theme support

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Primary text color
    pub fg: Color,
    /// Dimmed/secondary text
    pub dim: Color,
    /// Accent color (user messages, focus)
    pub accent: Color,
    /// Bot message header color
    pub bot: Color,
    /// Error color
    pub error: Color,
    /// Unread badge background
    pub badge: Color,
    /// Border color
    pub border: Color,
    dark: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Cyan,
            bot: Color::Green,
            error: Color::Red,
            badge: Color::LightRed,
            border: Color::DarkGray,
            dark: true,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            dim: Color::Gray,
            accent: Color::Blue,
            bot: Color::Rgb(0, 120, 60),
            error: Color::Red,
            badge: Color::Red,
            border: Color::Gray,
            dark: false,
        }
    }

    /// Look a theme up by name ("dark" or "light")
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// The other theme
    pub fn toggled(&self) -> Self {
        if self.dark { Self::light() } else { Self::dark() }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn accent_bold(&self) -> Style {
        self.accent_style().add_modifier(Modifier::BOLD)
    }

    pub fn bot_bold(&self) -> Style {
        Style::default().fg(self.bot).add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn badge_style(&self) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(self.badge)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Highlighted menu entry
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.accent)
            .fg(if self.dark { Color::Black } else { Color::White })
            .add_modifier(Modifier::BOLD)
    }
}
