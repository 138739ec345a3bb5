//! Controller configuration

use serde::{Deserialize, Serialize};

/// What to do with a network intent while another is pending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchPolicy {
    /// Refuse the new intent; state is left untouched
    #[default]
    Reject,
    /// Put both exchanges in flight; replies land in completion order
    Overlap,
}

/// Texts shown when the backend gives nothing usable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fallbacks {
    /// Application error without a message
    pub server_error: String,
    /// Application error without a message, on a menu request
    pub menu_error: String,
    /// Transport failure on a typed message
    pub send_failed: String,
    /// Transport failure on a menu selection
    pub selection_failed: String,
    /// Transport failure on a menu request
    pub menu_failed: String,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            server_error: "Server error.".to_string(),
            menu_error: "Could not load the menu.".to_string(),
            send_failed: "Sorry, something went wrong while connecting to the server."
                .to_string(),
            selection_failed: "Sorry, something went wrong while processing your selection."
                .to_string(),
            menu_failed: "The menu could not be loaded. Please try again.".to_string(),
        }
    }
}

/// Controller configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerConfig {
    pub dispatch: DispatchPolicy,
    pub fallbacks: Fallbacks,
    /// Start with the widget expanded
    pub widget_open: bool,
}
