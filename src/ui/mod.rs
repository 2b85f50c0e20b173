//! Presentation of chat bubbles.
//!
//! - [`bubbles`] keeps the rendered bubbles and scroll state for the full-screen view.
//! - [`chat_loop`] runs the interactive terminal session.
//! - [`renderer`] draws a frame from [`crate::core::app::ChatApp`].
//! - [`line`] prints bubbles as plain lines for the REPL and one-shot commands.
//! - [`theme`] holds the color policy.

pub mod bubbles;
pub mod chat_loop;
pub mod line;
pub mod renderer;
pub mod theme;
