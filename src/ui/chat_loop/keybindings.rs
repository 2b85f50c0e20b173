//! Key handling for the chat view.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Rows moved by one PageUp/PageDown press.
pub const PAGE_SCROLL: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    Quit,
    ReloadHistory,
    ScrollUp(u16),
    ScrollDown(u16),
    ScrollToBottom,
    /// Forward the key to the input box.
    Edit,
    Ignore,
}

pub fn map_key(key: &KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => KeyAction::Quit,
        KeyCode::Char('l') if ctrl => KeyAction::ReloadHistory,
        KeyCode::Esc => KeyAction::Quit,
        // The transcript is line oriented, so Enter always sends.
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Char('m') | KeyCode::Char('j') if ctrl => KeyAction::Submit,
        KeyCode::PageUp => KeyAction::ScrollUp(PAGE_SCROLL),
        KeyCode::PageDown => KeyAction::ScrollDown(PAGE_SCROLL),
        KeyCode::Up => KeyAction::ScrollUp(1),
        KeyCode::Down => KeyAction::ScrollDown(1),
        KeyCode::End if ctrl => KeyAction::ScrollToBottom,
        _ => KeyAction::Edit,
    }
}
