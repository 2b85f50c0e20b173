//! State behind the full-screen chat view.

use tui_textarea::TextArea;

use crate::api::{ChatError, ChatReply, ChatRequest};
use crate::core::session::{ChatSession, HistoryOutcome, SubmitOutcome, Submission};
use crate::ui::bubbles::BubbleList;
use crate::ui::theme::Theme;
use crate::utils::input::sanitize_text_input;
use crate::utils::logging::{LoggingRenderer, LoggingState};

pub struct ChatApp {
    pub session: ChatSession,
    pub bubbles: BubbleList,
    pub textarea: TextArea<'static>,
    pub theme: Theme,
    pub base_url: String,
    pub logging: LoggingState,
    pub loading_history: bool,
    pub status: Option<String>,
    pub exit_requested: bool,
}

impl ChatApp {
    pub fn new(theme: Theme, base_url: String, logging: LoggingState) -> Self {
        let textarea = new_textarea(&theme);
        Self {
            session: ChatSession::new(),
            bubbles: BubbleList::new(),
            textarea,
            theme,
            base_url,
            logging,
            loading_history: false,
            status: None,
            exit_requested: false,
        }
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn is_busy(&self) -> bool {
        self.loading_history || self.session.is_waiting()
    }

    /// Mark a history fetch as started. Returns false if one cannot start now.
    pub fn begin_history_load(&mut self) -> bool {
        if self.is_busy() {
            self.status = Some("Still waiting on the server".to_string());
            return false;
        }
        self.loading_history = true;
        self.status = None;
        true
    }

    pub fn apply_history(&mut self, result: Result<String, ChatError>) -> HistoryOutcome {
        self.loading_history = false;
        let mut renderer = LoggingRenderer::new(&mut self.bubbles, &self.logging);
        let outcome = self.session.apply_history(result, &mut renderer);
        if outcome == HistoryOutcome::Greeting {
            self.status = Some("Could not load earlier messages".to_string());
        }
        outcome
    }

    /// Echo the typed message and hand back the request to send, clearing
    /// the input. Busy or empty submissions leave the input alone.
    pub fn take_submission(&mut self) -> Option<ChatRequest> {
        if self.loading_history {
            self.status = Some("Still loading the conversation".to_string());
            return None;
        }

        let text = self.input_text();
        let mut renderer = LoggingRenderer::new(&mut self.bubbles, &self.logging);
        match self.session.begin_submit(&text, &mut renderer) {
            Submission::Empty => None,
            Submission::Busy => {
                self.status = Some("Waiting for the previous reply".to_string());
                None
            }
            Submission::Pending(request) => {
                self.textarea = new_textarea(&self.theme);
                self.status = None;
                Some(request)
            }
        }
    }

    pub fn apply_reply(&mut self, result: Result<ChatReply, ChatError>) -> SubmitOutcome {
        let mut renderer = LoggingRenderer::new(&mut self.bubbles, &self.logging);
        self.session.apply_reply(result, &mut renderer)
    }

    pub fn paste(&mut self, text: &str) {
        self.textarea.insert_str(sanitize_text_input(text));
    }

    pub fn logging_status(&self) -> String {
        self.logging.get_status_string()
    }
}

fn new_textarea(theme: &Theme) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_style(
        theme
            .input_text_style
            .patch(ratatui::style::Style::default().bg(theme.background_color)),
    );
    textarea.set_cursor_style(theme.input_cursor_style);
    textarea.set_cursor_line_style(ratatui::style::Style::default());
    textarea
}
