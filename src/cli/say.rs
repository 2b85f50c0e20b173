//! TUI-less "say" command

use std::error::Error;
use std::io::{self, Write};

use crate::api::ChatBackend;
use crate::core::session::{ChatSession, SubmitOutcome};
use crate::ui::bubbles::BubbleList;
use crate::ui::line::LineRenderer;
use crate::utils::logging::{LoggingRenderer, LoggingState};

pub async fn run_say<B>(
    prompt: Vec<String>,
    backend: &B,
    logging: &LoggingState,
) -> Result<(), Box<dyn Error>>
where
    B: ChatBackend + ?Sized,
{
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: chatbox say <message>");
        std::process::exit(1);
    }

    let mut stdout = io::stdout();
    let outcome = say_once(&prompt, backend, logging, &mut stdout).await;
    if outcome != SubmitOutcome::Replied {
        std::process::exit(1);
    }
    Ok(())
}

/// Load the session history (not shown), send one message and print the
/// reply, or the apology if the exchange fails.
pub(crate) async fn say_once<B, W>(
    prompt: &str,
    backend: &B,
    logging: &LoggingState,
    out: W,
) -> SubmitOutcome
where
    B: ChatBackend + ?Sized,
    W: Write,
{
    let mut session = ChatSession::new();
    session.load_history(backend, &mut BubbleList::new()).await;

    let mut printer = LineRenderer::new(out).bot_only();
    session
        .submit(prompt, backend, &mut LoggingRenderer::new(&mut printer, logging))
        .await
}
