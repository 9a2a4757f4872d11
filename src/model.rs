//! Request, response and event models shared by both beautify modes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::styles::Style;

/// Payload sent to the beautify service in both one-shot and stream mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BeautifyRequest {
    /// Markup to beautify
    pub html_code: String,

    /// Catalog id of the visual style to apply
    pub style: String,
}

impl BeautifyRequest {
    /// Create a request from markup and a style id.
    pub fn new(html_code: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            html_code: html_code.into(),
            style: style.into(),
        }
    }

    /// Create a request for a catalog style.
    pub fn with_style(html_code: impl Into<String>, style: &Style) -> Self {
        Self::new(html_code, style.id)
    }
}

/// Response envelope of one-shot calls.
///
/// `code == 0` marks success; any other code is a failure described by `message`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,

    #[serde(default)]
    pub message: Option<String>,

    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// A classified event of a beautify stream.
///
/// A well-formed stream carries zero or more `Content` events followed by
/// exactly one terminal event (`Done` or `Error`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamEvent {
    /// Fragment of the beautified output, to be appended to the running result
    Content(String),

    /// Successful completion
    Done,

    /// Failure reported by the server or detected while reading
    Error(String),
}

impl StreamEvent {
    /// Whether no further events follow this one.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StreamEvent::Content(_))
    }
}

/// Payload of a single `data:` frame as sent on the wire.
///
/// Fields are read one by one from a JSON object with JavaScript truthiness,
/// so a field of an unexpected type never hides the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFrame {
    pub content: Option<String>,

    pub done: bool,

    pub error: Option<String>,
}

impl EventFrame {
    /// Read the frame fields from a decoded JSON object.
    ///
    /// Falsy values (`null`, `false`, `0`, `""`) count as absent. Truthy
    /// non-string `content` or `error` values are kept in their JSON form.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            content: object.get("content").and_then(truthy_text),
            done: object.get("done").is_some_and(is_truthy),
            error: object.get("error").and_then(truthy_text),
        }
    }

    /// Classify the frame into the events it carries, in delivery order.
    ///
    /// A non-empty `error` wins over everything else. Content comes before
    /// `done` when a frame carries both. Frames with none of the three
    /// fields set produce nothing.
    pub fn into_events(self) -> Vec<StreamEvent> {
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            return vec![StreamEvent::Error(error)];
        }

        let mut events = Vec::new();
        if let Some(content) = self.content.filter(|c| !c.is_empty()) {
            events.push(StreamEvent::Content(content));
        }
        if self.done {
            events.push(StreamEvent::Done);
        }
        events
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        other if is_truthy(other) => Some(other.to_string()),
        _ => None,
    }
}
