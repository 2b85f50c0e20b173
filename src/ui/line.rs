//! Plain line-oriented output for the REPL and one-shot commands.

use std::io::Write;

use tracing::warn;

use crate::core::message::Speaker;
use crate::core::render::Renderer;

/// Writes each bubble as `You: text` / `Bot: text` on its own line.
pub struct LineRenderer<W: Write> {
    out: W,
    echo_user: bool,
    labels: bool,
}

impl<W: Write> LineRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            echo_user: true,
            labels: true,
        }
    }

    /// Print bot text only, unlabelled. Used by `say`, where the user's own
    /// message is already on the command line.
    pub fn bot_only(mut self) -> Self {
        self.echo_user = false;
        self.labels = false;
        self
    }

    /// Whether user bubbles are printed. The REPL turns this off once the
    /// history is shown, since the terminal already echoed what was typed.
    pub fn set_echo_user(&mut self, echo_user: bool) {
        self.echo_user = echo_user;
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for LineRenderer<W> {
    fn render_turn(&mut self, speaker: Speaker, text: &str) {
        if !self.echo_user && speaker.is_user() {
            return;
        }
        let result = if self.labels {
            writeln!(self.out, "{}: {}", speaker.display_label(), text)
        } else {
            writeln!(self.out, "{text}")
        };
        if let Err(err) = result.and_then(|_| self.out.flush()) {
            warn!(error = %err, "failed to write message");
        }
    }

    // Lines already printed stay printed.
    fn clear(&mut self) {}
}
