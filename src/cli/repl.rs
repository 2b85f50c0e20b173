//! Line-mode chat on stdin/stdout.

use std::error::Error;
use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::api::ChatBackend;
use crate::core::session::ChatSession;
use crate::ui::line::LineRenderer;
use crate::utils::logging::{LoggingRenderer, LoggingState};

pub async fn run_repl<B>(backend: &B, logging: &LoggingState) -> Result<(), Box<dyn Error>>
where
    B: ChatBackend + ?Sized,
{
    let stdin = BufReader::new(tokio::io::stdin());
    repl_loop(backend, logging, stdin, io::stdout()).await
}

pub(crate) async fn repl_loop<B, R, W>(
    backend: &B,
    logging: &LoggingState,
    input: R,
    out: W,
) -> Result<(), Box<dyn Error>>
where
    B: ChatBackend + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = ChatSession::new();
    let mut printer = LineRenderer::new(out);

    session
        .load_history(backend, &mut LoggingRenderer::new(&mut printer, logging))
        .await;
    // From here on the terminal has already echoed what the user typed.
    printer.set_echo_user(false);
    writeln!(printer.writer(), "Type 'exit' to end the conversation.")?;

    let mut lines = input.lines();
    loop {
        write!(printer.writer(), "You: ")?;
        printer.writer().flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(printer.writer())?;
            break;
        };
        if line.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        session
            .submit(&line, backend, &mut LoggingRenderer::new(&mut printer, logging))
            .await;
    }

    Ok(())
}
