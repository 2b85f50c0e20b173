//! Wire payloads and the HTTP client for the chat backend.

use serde::{Deserialize, Serialize};

pub mod client;
pub mod error;

pub use client::{ChatBackend, HttpBackend};
pub use error::ChatError;

pub const HISTORY_ENDPOINT: &str = "get_history";
pub const CHAT_ENDPOINT: &str = "chat";

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub history: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub new_history: String,
}
