use std::error::Error as StdError;
use std::fmt;

use reqwest::StatusCode;

/// Failure of a single request to the chat backend.
///
/// Every variant ends in the same user-facing fallback; the distinction is
/// kept for diagnostics.
#[derive(Debug)]
pub enum ChatError {
    /// The request never produced a response (connect, TLS, timeout, ...).
    Network(reqwest::Error),

    /// The backend answered with a non-success status.
    Status {
        status: StatusCode,
        /// Short description pulled from the body, if any.
        summary: Option<String>,
    },

    /// The response body was not the JSON shape we expected.
    Decode(reqwest::Error),
}

impl ChatError {
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::Network(_) => "network",
            ChatError::Status { .. } => "status",
            ChatError::Decode(_) => "decode",
        }
    }

    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        ChatError::Status {
            status,
            summary: summarize_error_body(body),
        }
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Network(source) => write!(f, "request failed: {source}"),
            ChatError::Status {
                status,
                summary: Some(summary),
            } => write!(f, "backend returned {status}: {summary}"),
            ChatError::Status {
                status,
                summary: None,
            } => write!(f, "backend returned {status}"),
            ChatError::Decode(source) => write!(f, "unexpected response body: {source}"),
        }
    }
}

impl StdError for ChatError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ChatError::Network(source) | ChatError::Decode(source) => Some(source),
            ChatError::Status { .. } => None,
        }
    }
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value.get("error").and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.to_string()),
                _ => None,
            })
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary.map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Condense an error response body into one line.
///
/// JSON bodies contribute their `error` / `error.message` / `message` field;
/// anything else is used as-is after whitespace is collapsed. Empty bodies
/// give `None`.
pub fn summarize_error_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(summary) = extract_error_summary(&json_value) {
            if !summary.is_empty() {
                return Some(summary);
            }
        }
    }

    Some(trimmed.split_whitespace().collect::<Vec<_>>().join(" "))
}
