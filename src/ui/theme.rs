use ratatui::style::{Color, Modifier, Style};

use crate::core::message::Speaker;

pub const THEME_NAMES: [&str; 3] = ["dark", "light", "monochrome"];

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Bubble styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub bot_prefix_style: Style,
    pub bot_text_style: Style,

    // Chrome
    pub title_style: Style,
    pub pending_indicator_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_cursor_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            bot_prefix_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::White),

            title_style: Style::default().fg(Color::Gray),
            pending_indicator_style: Style::default().fg(Color::Yellow),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),

            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            bot_prefix_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::Black),

            title_style: Style::default().fg(Color::DarkGray),
            pending_indicator_style: Style::default().fg(Color::Red),
            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),

            input_text_style: Style::default().fg(Color::Black),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// No colors at all; speakers are told apart by weight only.
    pub fn monochrome() -> Self {
        Theme {
            background_color: Color::Reset,
            user_prefix_style: Style::default().add_modifier(Modifier::BOLD),
            user_text_style: Style::default(),
            bot_prefix_style: Style::default().add_modifier(Modifier::BOLD),
            bot_text_style: Style::default(),

            title_style: Style::default(),
            pending_indicator_style: Style::default().add_modifier(Modifier::BOLD),
            input_border_style: Style::default(),
            input_title_style: Style::default(),

            input_text_style: Style::default(),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Look up a built-in theme by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::dark_default()),
            "light" => Some(Self::light()),
            "monochrome" | "mono" => Some(Self::monochrome()),
            _ => None,
        }
    }

    pub fn prefix_style(&self, speaker: Speaker) -> Style {
        match speaker {
            Speaker::User => self.user_prefix_style,
            Speaker::Bot => self.bot_prefix_style,
        }
    }

    pub fn text_style(&self, speaker: Speaker) -> Style {
        match speaker {
            Speaker::User => self.user_text_style,
            Speaker::Bot => self.bot_text_style,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_default()
    }
}
