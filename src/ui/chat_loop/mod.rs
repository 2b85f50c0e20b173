//! Main chat event loop.
//!
//! Terminal events and backend results arrive on one channel. Network calls
//! run on spawned tasks so the view keeps drawing while a reply is pending;
//! results are folded back into [`ChatApp`] in arrival order.

mod keybindings;
mod lifecycle;

use std::{error::Error, time::Duration};

use ratatui::crossterm::event::{self, Event};
use tokio::sync::mpsc;
use tracing::debug;

use self::keybindings::{map_key, KeyAction};
use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use crate::api::{ChatBackend, ChatError, ChatReply, ChatRequest, HttpBackend};
use crate::core::app::ChatApp;
use crate::ui::renderer::{chat_viewport, ui};
use crate::ui::theme::Theme;
use crate::utils::logging::LoggingState;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
    HistoryLoaded(Result<String, ChatError>),
    ReplyReceived(Result<ChatReply, ChatError>),
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            // Use a short timeout to prevent blocking
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => continue,
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

fn spawn_history_fetch(backend: HttpBackend, event_tx: mpsc::UnboundedSender<UiEvent>) {
    tokio::spawn(async move {
        let result = backend.fetch_history().await;
        let _ = event_tx.send(UiEvent::HistoryLoaded(result));
    });
}

fn spawn_chat(
    backend: HttpBackend,
    request: ChatRequest,
    event_tx: mpsc::UnboundedSender<UiEvent>,
) {
    tokio::spawn(async move {
        let result = backend.send_chat(&request).await;
        let _ = event_tx.send(UiEvent::ReplyReceived(result));
    });
}

/// Apply one terminal event, spawning network work it triggers.
fn handle_terminal_event(
    app: &mut ChatApp,
    event: Event,
    terminal: &ChatTerminal,
    backend: &HttpBackend,
    event_tx: &mpsc::UnboundedSender<UiEvent>,
) {
    match event {
        Event::Key(key) => match map_key(&key) {
            KeyAction::Quit => app.exit_requested = true,
            KeyAction::Submit => {
                if let Some(request) = app.take_submission() {
                    spawn_chat(backend.clone(), request, event_tx.clone());
                }
            }
            KeyAction::ReloadHistory => {
                if app.begin_history_load() {
                    spawn_history_fetch(backend.clone(), event_tx.clone());
                }
            }
            KeyAction::ScrollUp(lines) => {
                let (width, height) = chat_viewport(terminal.size().unwrap_or_default());
                app.bubbles.scroll_up(lines, width, height);
            }
            KeyAction::ScrollDown(lines) => app.bubbles.scroll_down(lines),
            KeyAction::ScrollToBottom => app.bubbles.scroll_to_bottom(),
            KeyAction::Edit => {
                app.status = None;
                app.textarea.input(tui_textarea::Input::from(key));
            }
            KeyAction::Ignore => {}
        },
        Event::Paste(text) => app.paste(&text),
        _ => {}
    }
}

async fn event_loop(
    app: &mut ChatApp,
    terminal: &mut ChatTerminal,
    backend: &HttpBackend,
    event_tx: &mpsc::UnboundedSender<UiEvent>,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
) -> Result<(), Box<dyn Error>> {
    loop {
        if app.exit_requested {
            return Ok(());
        }

        terminal.draw(|f| ui(f, app))?;

        let Some(event) = event_rx.recv().await else {
            return Ok(());
        };
        match event {
            UiEvent::Crossterm(event) => {
                handle_terminal_event(app, event, terminal, backend, event_tx);
            }
            UiEvent::HistoryLoaded(result) => {
                let outcome = app.apply_history(result);
                debug!(?outcome, "history applied");
            }
            UiEvent::ReplyReceived(result) => {
                let outcome = app.apply_reply(result);
                debug!(?outcome, "reply applied");
            }
        }
    }
}

pub async fn run_chat(
    backend: HttpBackend,
    theme: Theme,
    logging: LoggingState,
) -> Result<(), Box<dyn Error>> {
    let mut app = ChatApp::new(theme, backend.base_url().to_string(), logging);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();

    let mut terminal = setup_terminal()?;
    let reader = spawn_event_reader(event_tx.clone());

    if app.begin_history_load() {
        spawn_history_fetch(backend.clone(), event_tx.clone());
    }

    let result = event_loop(&mut app, &mut terminal, &backend, &event_tx, &mut event_rx).await;

    reader.abort();
    restore_terminal(&mut terminal)?;
    result
}
