//! Menu options offered by the bot

use crate::theme::Theme;
use parley_core::MenuOption;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, HighlightSpacing, List, ListItem, ListState, StatefulWidget, Widget},
};

/// Highlighted entry of the visible menu
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub selected: usize,
}

impl MenuState {
    /// Move selection up, wrapping to the last option
    pub fn up(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.selected = if self.selected > 0 {
            self.selected - 1
        } else {
            count - 1
        };
    }

    /// Move selection down, wrapping to the first option
    pub fn down(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.selected = if self.selected + 1 < count {
            self.selected + 1
        } else {
            0
        };
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// The highlighted option, if the menu has one at that index
    pub fn current<'o>(&self, options: &'o [MenuOption]) -> Option<&'o MenuOption> {
        options.get(self.selected)
    }
}

/// Rows the grid needs for `count` options
pub fn grid_height(count: usize) -> u16 {
    (count.min(8) as u16) + 2
}

/// Bordered, numbered list of menu options
pub struct MenuGrid<'a> {
    options: &'a [MenuOption],
    state: MenuState,
    theme: &'a Theme,
}

impl<'a> MenuGrid<'a> {
    pub fn new(options: &'a [MenuOption], state: MenuState, theme: &'a Theme) -> Self {
        Self {
            options,
            state,
            theme,
        }
    }
}

impl Widget for MenuGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let items: Vec<ListItem> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = if i == self.state.selected {
                    theme.selected_style()
                } else {
                    theme.base_style()
                };
                ListItem::new(Line::from(Span::styled(
                    format!("{}. {}", i + 1, option.label),
                    style,
                )))
            })
            .collect();

        let block = Block::default()
            .title(" Menu ")
            .title_style(theme.accent_bold())
            .borders(Borders::ALL)
            .border_style(theme.accent_style());

        let list = List::new(items)
            .block(block)
            .highlight_symbol("› ")
            .highlight_spacing(HighlightSpacing::Always);

        let mut list_state = ListState::default();
        list_state.select(Some(self.state.selected));
        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let mut state = MenuState::default();
        state.up(3);
        assert_eq!(state.selected, 2);
        state.down(3);
        assert_eq!(state.selected, 0);
        state.down(0);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_current_option() {
        let options = vec![
            MenuOption::new("courses", "Cursos"),
            MenuOption::new("prices", "Preços"),
        ];
        let mut state = MenuState::default();
        state.down(options.len());
        assert_eq!(state.current(&options).map(|o| o.command.as_str()), Some("prices"));
        state.selected = 5;
        assert!(state.current(&options).is_none());
    }
}
