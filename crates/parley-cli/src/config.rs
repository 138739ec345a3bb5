//! Configuration file support

use parley_client::RetryPolicy;
use parley_core::{ControllerConfig, DispatchPolicy, Fallbacks};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Endpoint used when neither the flag, the env var nor the file names one
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/chat";

/// Configuration for parley
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chat endpoint URL
    pub endpoint: Option<String>,
    /// Start with the widget expanded
    pub open_on_start: Option<bool>,
    /// "dark" or "light"
    pub theme: Option<String>,
    /// Behaviour when an intent arrives while a reply is pending
    pub dispatch: DispatchPolicy,
    pub retry: RetryPolicy,
    pub fallbacks: Fallbacks,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("parley")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("PARLEY_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Write the example config if no file exists yet
    pub fn init(path: &Path) -> std::io::Result<PathBuf> {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, example_config())?;
        Ok(path.to_path_buf())
    }

    /// Pick the endpoint: flag, then `PARLEY_ENDPOINT`, then file, then default
    pub fn resolve_endpoint(&self, flag: Option<&str>, env: Option<&str>) -> String {
        flag.or(env)
            .or(self.endpoint.as_deref())
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_string()
    }

    pub fn controller_config(&self, open: bool) -> ControllerConfig {
        ControllerConfig {
            dispatch: self.dispatch,
            fallbacks: self.fallbacks.clone(),
            widget_open: open || self.open_on_start.unwrap_or(false),
        }
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# parley configuration file
# Place at ~/.config/parley/config.toml (Linux) or set PARLEY_CONFIG_PATH

# Chat endpoint (PARLEY_ENDPOINT and --endpoint take precedence)
endpoint = "http://localhost:5000/chat"

# Start with the chat panel expanded
open_on_start = false

# Color theme: dark or light (Ctrl+T toggles at runtime)
theme = "dark"

# What happens when you send while a reply is pending:
#   reject  - ignore the new message until the reply arrives
#   overlap - send it anyway; replies appear in the order they arrive
dispatch = "reject"

[retry]
max_attempts = 3
base_delay_ms = 1000
max_delay_ms = 30000
# linear or exponential
backoff = "linear"

# Messages shown when the server gives nothing usable
[fallbacks]
# send_failed = "Sorry, something went wrong while connecting to the server."
# selection_failed = "Sorry, something went wrong while processing your selection."
# menu_failed = "The menu could not be loaded. Please try again."
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_client::Backoff;

    #[test]
    fn test_example_config_parses() {
        let config = Config::parse(example_config()).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some(DEFAULT_ENDPOINT));
        assert_eq!(config.dispatch, DispatchPolicy::Reject);
        assert_eq!(config.retry, RetryPolicy::default());
        assert_eq!(config.fallbacks, Fallbacks::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = Config::parse(
            r#"
            dispatch = "overlap"
            [retry]
            backoff = "exponential"
            [fallbacks]
            menu_failed = "Menu indisponível"
            "#,
        )
        .unwrap();

        assert_eq!(config.dispatch, DispatchPolicy::Overlap);
        assert_eq!(config.retry.backoff, Backoff::Exponential);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.fallbacks.menu_failed, "Menu indisponível");
        assert_eq!(config.fallbacks.send_failed, Fallbacks::default().send_failed);
    }

    #[test]
    fn test_unknown_dispatch_is_rejected() {
        assert!(Config::parse("dispatch = \"queue\"").is_err());
    }

    #[test]
    fn test_endpoint_precedence() {
        let config = Config {
            endpoint: Some("http://file/chat".into()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_endpoint(Some("http://flag/chat"), Some("http://env/chat")),
            "http://flag/chat"
        );
        assert_eq!(config.resolve_endpoint(None, Some("http://env/chat")), "http://env/chat");
        assert_eq!(config.resolve_endpoint(None, None), "http://file/chat");
        assert_eq!(Config::default().resolve_endpoint(None, None), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_open_flag_or_file() {
        let config = Config {
            open_on_start: Some(true),
            ..Default::default()
        };
        assert!(config.controller_config(false).widget_open);
        assert!(Config::default().controller_config(true).widget_open);
        assert!(!Config::default().controller_config(false).widget_open);
    }
}
