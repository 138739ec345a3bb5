//! Full-screen terminal host for the chat widget

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use parley_core::{ConversationController, ConversationEvent, ConversationState, DispatchPolicy};
use parley_tui::{
    Theme,
    input::{Action, event_to_action},
    widgets::{
        InputBox, Launcher, MenuGrid, MenuState, MessageList, TypingIndicator, Welcome,
        content_height, menu_grid::grid_height,
    },
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use std::io::Stdout;
use std::time::{Duration, Instant};
use tokio::sync::broadcast::error::RecvError;

const PAGE: usize = 10;

/// Host-side view state; conversation state itself lives in the controller
pub struct TuiState {
    controller: ConversationController,
    theme: Theme,
    input: InputBox,
    menu: MenuState,
    /// First visible transcript line; `usize::MAX` pins to the bottom
    scroll: usize,
    spinner_start: Instant,
    status: String,
}

impl TuiState {
    pub fn new(controller: ConversationController, theme: Theme) -> Self {
        let mut input = InputBox::new().with_placeholder("Type your message...");
        input.set_focused(true);
        Self {
            controller,
            theme,
            input,
            menu: MenuState::default(),
            scroll: usize::MAX,
            spinner_start: Instant::now(),
            status: String::new(),
        }
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll = usize::MAX;
    }

    /// Apply a controller event to the view state
    pub fn handle_event(&mut self, event: &ConversationEvent) {
        match event {
            ConversationEvent::MessageAppended { .. } | ConversationEvent::Cleared => {
                self.scroll_to_bottom();
            }
            ConversationEvent::MenuVisibilityChanged { visible: true } => self.menu.reset(),
            ConversationEvent::LoadingChanged { loading: true } => {
                self.spinner_start = Instant::now();
                self.status.clear();
            }
            ConversationEvent::DispatchRejected { .. } => {
                self.status = "Still waiting for the previous reply".to_string();
            }
            _ => {}
        }
    }

    fn spawn_send(&self, text: String) {
        let controller = self.controller.clone();
        tokio::spawn(async move {
            controller.send_message(&text).await;
        });
    }

    fn spawn_select(&self, command: String) {
        let controller = self.controller.clone();
        tokio::spawn(async move {
            controller.select_menu_option(&command).await;
        });
    }

    fn spawn_menu(&self) {
        let controller = self.controller.clone();
        tokio::spawn(async move {
            controller.request_menu().await;
        });
    }

    fn submit(&mut self, state: &ConversationState) {
        if self.input.is_empty() {
            if let Some(option) = state.active_menu().and_then(|o| self.menu.current(o)) {
                self.spawn_select(option.command.clone());
            }
            return;
        }

        // Keep the draft while a reply is pending and overlap is off
        if state.loading && self.controller.config().dispatch == DispatchPolicy::Reject {
            self.status = "Still waiting for the previous reply".to_string();
            return;
        }

        let text = self.input.take();
        self.spawn_send(text);
    }

    /// Handle an input action. Returns false when the app should quit.
    pub fn handle_action(&mut self, action: Action, width: u16) -> bool {
        let state = self.controller.snapshot();

        match action {
            Action::Interrupt | Action::Quit => return false,
            Action::ToggleWidget => self.controller.toggle_widget(),
            Action::ToggleTheme => self.theme = self.theme.toggled(),
            _ if !state.widget_open => {
                if action == Action::Submit {
                    self.controller.open_widget();
                }
            }
            Action::Escape => self.controller.close_widget(),
            Action::RequestMenu => self.spawn_menu(),
            Action::ClearConversation => {
                self.controller.clear_conversation();
                self.status = "Cleared".to_string();
            }
            Action::Submit => self.submit(&state),
            Action::Up | Action::BackTab => match state.active_menu() {
                Some(options) => self.menu.up(options.len()),
                None => self.scroll = self.scroll.saturating_sub(1),
            },
            Action::Down | Action::Tab => match state.active_menu() {
                Some(options) => self.menu.down(options.len()),
                None => self.scroll = self.scroll.saturating_add(1),
            },
            Action::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            Action::PageDown => self.scroll = self.scroll.saturating_add(PAGE),
            other => {
                self.input.handle_action(&other, width);
            }
        }
        true
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let state = self.controller.snapshot();
        let area = frame.area();

        if state.widget_open {
            self.render_panel(frame, area, &state);
        } else {
            self.render_collapsed(frame, area, &state);
        }
    }

    fn render_collapsed(&self, frame: &mut Frame, area: Rect, state: &ConversationState) {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Enter or Ctrl+O to open the chat · Ctrl+C to quit",
            self.theme.dim_style(),
        )));
        frame.render_widget(hint, Rect::new(area.x + 1, area.y, area.width.saturating_sub(1), 1));

        let launcher = Launcher::new("Chat", state.unread_count, &self.theme);
        let width = launcher.width().min(area.width);
        let height = 3.min(area.height);
        let bubble = Rect::new(
            area.right().saturating_sub(width + 1),
            area.bottom().saturating_sub(height + 1),
            width,
            height,
        );
        frame.render_widget(launcher, bubble);
    }

    fn render_panel(&mut self, frame: &mut Frame, area: Rect, state: &ConversationState) {
        let title = format!(" parley │ {} ", self.controller.endpoint());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_style())
            .title(title)
            .style(self.theme.base_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let menu = state.active_menu();
        let menu_height = menu.map(|o| grid_height(o.len())).unwrap_or(0);

        let [messages_area, menu_area, typing_area, input_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(menu_height),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_messages(frame, messages_area, state);

        if let Some(options) = menu {
            frame.render_widget(MenuGrid::new(options, self.menu, &self.theme), menu_area);
        }

        if state.loading {
            let typing = TypingIndicator::new("Bot is typing...", &self.theme)
                .started_at(self.spinner_start);
            frame.render_widget(typing, typing_area);
        }

        self.input.render(input_area, frame.buffer_mut(), &self.theme, !state.loading);
        self.render_status(frame, status_area);
    }

    fn render_messages(&mut self, frame: &mut Frame, area: Rect, state: &ConversationState) {
        if area.height == 0 {
            return;
        }
        if state.messages.is_empty() {
            frame.render_widget(Welcome::new(self.controller.endpoint(), &self.theme), area);
            return;
        }

        let height = content_height(&state.messages, area.width as usize);
        let max_scroll = height.saturating_sub(area.height as usize);
        self.scroll = self.scroll.min(max_scroll);

        frame.render_widget(
            MessageList::new(&state.messages, &self.theme).scroll(self.scroll),
            area,
        );

        if height > area.height as usize {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"))
                .track_symbol(Some("│"))
                .thumb_symbol("█");
            let mut scrollbar_state = ScrollbarState::new(height)
                .position(self.scroll)
                .viewport_content_length(area.height as usize);
            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let left = if self.status.is_empty() {
            if self.theme.is_dark() { "dark" } else { "light" }.to_string()
        } else {
            self.status.clone()
        };
        let right = "Ctrl+E menu │ Ctrl+L clear │ Esc close │ Ctrl+C quit";

        let available = area.width as usize;
        let used = left.chars().count() + right.chars().count();
        let line = if used + 2 <= available {
            Line::from(vec![
                Span::styled(left, self.theme.dim_style()),
                Span::raw(" ".repeat(available - used)),
                Span::styled(right, self.theme.dim_style()),
            ])
        } else {
            Line::from(Span::styled(left, self.theme.dim_style()))
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut TuiState,
) -> anyhow::Result<()> {
    let mut controller_rx = state.controller.subscribe();
    let mut event_stream = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(80));
    let mut dirty = true;

    loop {
        if dirty || state.controller.is_loading() {
            terminal.draw(|frame| state.render(frame))?;
            dirty = false;
        }
        let width = terminal.size()?.width;

        tokio::select! {
            biased;

            event = controller_rx.recv() => match event {
                Ok(event) => {
                    state.handle_event(&event);
                    dirty |= event.is_visible_change();
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("UI lagged behind {} controller events", skipped);
                    state.scroll_to_bottom();
                    dirty = true;
                }
                Err(RecvError::Closed) => return Ok(()),
            },

            event = event_stream.next() => match event {
                Some(Ok(Event::Resize(_, _))) => dirty = true,
                Some(Ok(event)) => {
                    if let Some(action) = event_to_action(event) {
                        if !state.handle_action(action, width) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                }
                Some(Err(e)) => return Err(anyhow::anyhow!("Event error: {}", e)),
                None => return Ok(()),
            },

            _ = tick.tick() => {}
        }
    }
}

/// Run the TUI until the user quits
pub async fn run_tui(controller: ConversationController, theme: Theme) -> anyhow::Result<()> {
    use crossterm::{
        event::{DisableBracketedPaste, EnableBracketedPaste},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use std::io;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut state = TuiState::new(controller.clone(), theme);
    let result = event_loop(&mut terminal, &mut state).await;

    controller.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_client::{HttpExchange, RetryingClient};
    use parley_core::{ControllerConfig, IntentKind};
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn state(open: bool) -> TuiState {
        let client = RetryingClient::new(Arc::new(HttpExchange::new()), "http://127.0.0.1:9/chat");
        let config = ControllerConfig {
            widget_open: open,
            ..Default::default()
        };
        TuiState::new(ConversationController::new(client, config), Theme::dark())
    }

    fn screen_text(state: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        terminal.draw(|frame| state.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_escape_and_toggle_drive_widget_visibility() {
        let mut ui = state(true);
        assert!(ui.handle_action(Action::Escape, 70));
        assert!(!ui.controller.snapshot().widget_open);

        // Typing while collapsed goes nowhere
        ui.handle_action(Action::Char('x'), 70);
        assert!(ui.input.is_empty());

        ui.handle_action(Action::Submit, 70);
        assert!(ui.controller.snapshot().widget_open);
        ui.handle_action(Action::ToggleWidget, 70);
        assert!(!ui.controller.snapshot().widget_open);
    }

    #[test]
    fn test_quit_and_theme() {
        let mut ui = state(false);
        ui.handle_action(Action::ToggleTheme, 70);
        assert!(!ui.theme.is_dark());
        assert!(!ui.handle_action(Action::Quit, 70));
        assert!(!ui.handle_action(Action::Interrupt, 70));
    }

    #[test]
    fn test_blank_submit_without_menu_keeps_state() {
        let mut ui = state(true);
        ui.handle_action(Action::Submit, 70);
        assert!(ui.controller.snapshot().messages.is_empty());
    }

    #[test]
    fn test_rejected_dispatch_shows_status() {
        let mut ui = state(true);
        ui.handle_event(&ConversationEvent::DispatchRejected {
            intent: IntentKind::SendMessage,
        });
        assert_eq!(ui.status, "Still waiting for the previous reply");
        ui.handle_event(&ConversationEvent::LoadingChanged { loading: true });
        assert!(ui.status.is_empty());
    }

    #[test]
    fn test_render_collapsed_and_open() {
        let mut ui = state(false);
        assert!(screen_text(&mut ui).contains("Chat"));

        ui.handle_action(Action::ToggleWidget, 70);
        let text = screen_text(&mut ui);
        assert!(text.contains("parley"));
        assert!(text.contains("How can we help?"));
    }
}
