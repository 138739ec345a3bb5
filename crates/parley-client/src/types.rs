//! Wire types for the chat endpoint

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Reserved payload that asks the backend for its quick-reply menu
pub const MENU_COMMAND: &str = "menu";

/// Request body sent to the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Free-form text, a menu command token, or [`MENU_COMMAND`]
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Request for the backend menu
    pub fn menu() -> Self {
        Self::new(MENU_COMMAND)
    }
}

/// A backend-supplied quick reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    /// Opaque token echoed back verbatim when the option is selected
    pub command: String,
    /// Display label
    pub label: String,
}

impl MenuOption {
    pub fn new(command: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            label: label.into(),
        }
    }
}

/// A normal backend answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub menu_options: Option<Vec<MenuOption>>,
    pub source: Option<String>,
    pub suggestions: Vec<String>,
    pub end_chat: bool,
}

impl Answer {
    /// Whether the answer carries at least one menu option
    pub fn has_menu(&self) -> bool {
        self.menu_options.as_ref().is_some_and(|opts| !opts.is_empty())
    }
}

/// Outcome of a transport-successful exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Backend answered normally
    Answer(Answer),
    /// Backend flagged an application-level error; never retried
    Failure { message: Option<String> },
}

impl Reply {
    /// Decode a response body
    pub fn from_body(body: &str) -> Result<Self> {
        let raw: RawReply =
            serde_json::from_str(body).map_err(|e| Error::Decode(e.to_string()))?;
        raw.try_into()
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Reply::Failure { .. })
    }
}

/// Body as it appears on the wire; both reply shapes share one object.
#[derive(Debug, Deserialize)]
struct RawReply {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    menu_options: Option<Vec<MenuOption>>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    suggestions: Option<Vec<String>>,
    #[serde(default)]
    end_chat: Option<bool>,
}

impl TryFrom<RawReply> for Reply {
    type Error = Error;

    fn try_from(raw: RawReply) -> Result<Self> {
        if raw.error.as_ref().is_some_and(is_truthy) {
            return Ok(Reply::Failure {
                message: raw.message.filter(|m| !m.is_empty()),
            });
        }

        let text = raw
            .response
            .ok_or_else(|| Error::Decode("reply has neither `response` nor `error`".into()))?;

        Ok(Reply::Answer(Answer {
            text,
            menu_options: raw.menu_options,
            source: raw.source,
            suggestions: raw.suggestions.unwrap_or_default(),
            end_chat: raw.end_chat.unwrap_or(false),
        }))
    }
}

/// Truthiness of the `error` flag. The backend sends either `true` or a
/// descriptive string.
fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_message_field() {
        let body = serde_json::to_string(&ChatRequest::new("oi")).unwrap();
        assert_eq!(body, r#"{"message":"oi"}"#);
        assert_eq!(ChatRequest::menu().message, "menu");
    }

    #[test]
    fn test_decode_answer_with_menu() {
        let reply = Reply::from_body(
            r#"{"response":"Escolha uma opção","menu_options":[{"command":"/cursos","label":"Cursos"}]}"#,
        )
        .unwrap();
        let Reply::Answer(answer) = reply else {
            panic!("expected answer");
        };
        assert_eq!(answer.text, "Escolha uma opção");
        assert!(answer.has_menu());
        assert_eq!(
            answer.menu_options.unwrap(),
            vec![MenuOption::new("/cursos", "Cursos")]
        );
        assert!(answer.source.is_none());
    }

    #[test]
    fn test_decode_answer_with_source() {
        let reply = Reply::from_body(r#"{"response":"R$99/mês","source":"catalog"}"#).unwrap();
        let Reply::Answer(answer) = reply else {
            panic!("expected answer");
        };
        assert_eq!(answer.source.as_deref(), Some("catalog"));
        assert!(!answer.has_menu());
        assert!(!answer.end_chat);
    }

    #[test]
    fn test_decode_end_chat_and_suggestions() {
        let reply = Reply::from_body(
            r#"{"response":"Não entendi.","suggestions":["menu","cursos"],"end_chat":true}"#,
        )
        .unwrap();
        let Reply::Answer(answer) = reply else {
            panic!("expected answer");
        };
        assert_eq!(answer.suggestions, vec!["menu", "cursos"]);
        assert!(answer.end_chat);
    }

    #[test]
    fn test_empty_menu_is_not_a_menu() {
        let reply = Reply::from_body(r#"{"response":"x","menu_options":[]}"#).unwrap();
        let Reply::Answer(answer) = reply else {
            panic!("expected answer");
        };
        assert!(!answer.has_menu());
    }

    #[test]
    fn test_decode_failure_with_bool_flag() {
        let reply = Reply::from_body(r#"{"error":true,"message":"Falhou"}"#).unwrap();
        assert_eq!(
            reply,
            Reply::Failure {
                message: Some("Falhou".into())
            }
        );
    }

    #[test]
    fn test_decode_failure_with_string_flag() {
        let reply = Reply::from_body(r#"{"error":"Formato inválido"}"#).unwrap();
        assert_eq!(reply, Reply::Failure { message: None });
    }

    #[test]
    fn test_falsy_error_flag_is_an_answer() {
        let reply = Reply::from_body(r#"{"error":false,"response":"ok"}"#).unwrap();
        assert!(!reply.is_failure());
        let reply = Reply::from_body(r#"{"error":"","response":"ok"}"#).unwrap();
        assert!(!reply.is_failure());
    }

    #[test]
    fn test_missing_response_is_decode_error() {
        let err = Reply::from_body(r#"{"source":"x"}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let err = Reply::from_body("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
