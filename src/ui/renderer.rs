use crate::core::app::ChatApp;
use ratatui::{
    layout::{Constraint, Layout, Rect, Size},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Input box height including its borders.
pub const INPUT_AREA_HEIGHT: u16 = 3;

const IDLE_TITLE: &str =
    "Type your message (Enter to send, PgUp/PgDn to scroll, Ctrl+L to reload, Ctrl+C to quit)";

fn split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(INPUT_AREA_HEIGHT),
    ])
    .split(area);
    (chunks[0], chunks[1])
}

/// Width and height available to bubbles in a terminal of `size`.
pub fn chat_viewport(size: Size) -> (u16, u16) {
    let (chat, _) = split(Rect::new(0, 0, size.width, size.height));
    // One row for the title
    (chat.width, chat.height.saturating_sub(1))
}

pub fn ui(f: &mut Frame, app: &ChatApp) {
    let theme = &app.theme;
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        f.area(),
    );

    let (chat_area, input_area) = split(f.area());

    let title = format!(
        "chatbox v{} - {} • Logging: {}",
        env!("CARGO_PKG_VERSION"),
        app.base_url,
        app.logging_status()
    );

    let available_height = chat_area.height.saturating_sub(1);
    let scroll_offset = app.bubbles.scroll_offset(chat_area.width, available_height);

    let messages = Paragraph::new(app.bubbles.build_display_lines(theme))
        .block(Block::default().title(Span::styled(title, theme.title_style)))
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset, 0));
    f.render_widget(messages, chat_area);

    let input_title = if app.loading_history {
        Span::styled("Loading conversation…", theme.pending_indicator_style)
    } else if app.session.is_waiting() {
        Span::styled("Waiting for reply… (Ctrl+C to quit)", theme.pending_indicator_style)
    } else if let Some(status) = &app.status {
        Span::styled(status.clone(), theme.pending_indicator_style)
    } else {
        Span::styled(IDLE_TITLE, theme.input_title_style)
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(input_title);
    let inner = input_block.inner(input_area);
    f.render_widget(input_block, input_area);
    f.render_widget(&app.textarea, inner);
}
