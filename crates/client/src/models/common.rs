//! Common types shared across Splunk API models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic message from the Splunk API.
///
/// Unrecognized severities keep their original spelling so failure
/// diagnostics read exactly as the server wrote them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageType {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Other(String),
}

impl From<String> for MessageType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "FATAL" => Self::Fatal,
            "ERROR" => Self::Error,
            "WARN" => Self::Warn,
            "INFO" => Self::Info,
            "DEBUG" => Self::Debug,
            _ => Self::Other(value),
        }
    }
}

impl From<MessageType> for String {
    fn from(value: MessageType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fatal => write!(f, "FATAL"),
            Self::Error => write!(f, "ERROR"),
            Self::Warn => write!(f, "WARN"),
            Self::Info => write!(f, "INFO"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// A single message from Splunk.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SplunkMessage {
    #[serde(rename = "type", default = "unknown_type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub text: String,
}

fn unknown_type() -> MessageType {
    MessageType::Other("UNKNOWN".to_string())
}

impl fmt::Display for SplunkMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message_type, self.text)
    }
}

/// A collection of messages from Splunk.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SplunkMessages {
    #[serde(default)]
    pub messages: Vec<SplunkMessage>,
}

impl SplunkMessages {
    /// Render every message as `TYPE: text`, joined by `separator`.
    pub fn joined(&self, separator: &str) -> String {
        self.messages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}
