use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SUBSCRIBE_EVENT: &str = "subscribe";
pub const MESSAGE_EVENT: &str = "message";

/// A decoded pub/sub event. `kind` is an open set; only `subscribe` is special.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Event {
    pub fn new(kind: impl Into<String>, data: impl Into<serde_json::Value>) -> Self {
        Self {
            kind: kind.into(),
            data: data.into(),
        }
    }

    pub fn message(data: impl Into<String>) -> Self {
        Self::new(MESSAGE_EVENT, serde_json::Value::String(data.into()))
    }

    pub fn subscribe(channel: impl Into<String>) -> Self {
        Self::new(SUBSCRIBE_EVENT, serde_json::Value::String(channel.into()))
    }

    pub fn is_subscribe(&self) -> bool {
        self.kind == SUBSCRIBE_EVENT
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    Quit,
    /// `mine` is set when the author owns the receiving stream.
    Message { html: String, mine: bool },
}

impl Routed {
    /// Tuple form handed to collaborators that expect `(text, mine)`.
    pub fn as_pair(&self) -> (&str, bool) {
        match self {
            Routed::Quit => ("quit", true),
            Routed::Message { html, mine } => (html.as_str(), *mine),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PostRequest {
    pub user: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuitRequest {
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub author: String,
    pub html: String,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
