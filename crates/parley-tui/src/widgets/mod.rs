//! Widgets for the chat panel

pub mod input_box;
pub mod launcher;
pub mod menu_grid;
pub mod message_list;
pub mod spinner;
pub mod welcome;

pub use input_box::InputBox;
pub use launcher::{Launcher, badge_label};
pub use menu_grid::{MenuGrid, MenuState};
pub use message_list::{MessageList, content_height};
pub use spinner::TypingIndicator;
pub use welcome::Welcome;
