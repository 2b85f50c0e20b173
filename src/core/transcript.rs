//! The conversation transcript exchanged with the backend.
//!
//! The transcript is kept exactly as the server sent it. The client never
//! appends to it or re-serializes it; it only parses it for display and
//! sends it back verbatim with the next message.

use crate::core::message::Turn;

/// Shown (and seeded into the transcript) when history cannot be fetched.
pub const GREETING_TEXT: &str = "Hello! I'm your AI assistant. How can I help?";

/// Shown when a chat exchange fails.
pub const APOLOGY_TEXT: &str = "Sorry, something went wrong. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript holding only the greeting line.
    pub fn greeting() -> Self {
        Self(format!("{}\n", Turn::bot(GREETING_TEXT).to_line()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recognized turns in order. Lines without a `User: ` or `Bot: ` prefix
    /// are skipped.
    pub fn turns(&self) -> impl Iterator<Item = Turn> + '_ {
        parse_turns(&self.0)
    }
}

impl From<String> for Transcript {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Transcript {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

pub fn parse_turns(text: &str) -> impl Iterator<Item = Turn> + '_ {
    text.split('\n').filter_map(Turn::from_line)
}
