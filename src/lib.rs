//! chatbox is a terminal client for a chat backend that keeps the conversation
//! on the server.
//!
//! The conversation lives in a single transcript string of `User: ` / `Bot: `
//! lines. The client loads it from `GET /get_history`, sends it back with every
//! message to `POST /chat`, and replaces it with whatever the backend returns.
//!
//! The crate is organized in a few layers:
//! - [`api`] holds the wire payloads, the [`api::ChatBackend`] seam and its
//!   reqwest implementation.
//! - [`core`] owns the transcript, turn parsing, the [`core::render::Renderer`]
//!   trait, the [`core::session::ChatSession`] state machine and configuration.
//! - [`ui`] renders bubbles, either full-screen with ratatui or as plain lines.
//! - [`cli`] parses arguments and dispatches to the interactive, line-based or
//!   one-shot front ends.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod logging;
pub mod ui;
pub mod utils;
