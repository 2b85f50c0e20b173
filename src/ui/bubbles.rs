//! The list of message bubbles shown in the chat area.

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::core::message::{Speaker, Turn};
use crate::core::render::Renderer;
use crate::ui::theme::Theme;

/// In-memory bubble list with scroll state.
///
/// New bubbles pin the view to the bottom unless the user has scrolled up.
#[derive(Debug, Clone)]
pub struct BubbleList {
    turns: Vec<Turn>,
    /// Lines scrolled up from the bottom.
    scroll_back: u16,
}

impl BubbleList {
    pub fn new() -> Self {
        Self {
            turns: Vec::new(),
            scroll_back: 0,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[cfg(test)]
    pub fn is_pinned_to_bottom(&self) -> bool {
        self.scroll_back == 0
    }

    /// Display lines for every bubble, one blank line between bubbles.
    /// Line breaks inside a bubble start a new display line.
    pub fn build_display_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.turns.len() * 2);
        for turn in &self.turns {
            let text_style = theme.text_style(turn.speaker);
            let mut segments = text_lines(&turn.text);
            let first = segments.next().unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", turn.speaker.display_label()),
                    theme.prefix_style(turn.speaker),
                ),
                Span::styled(first.to_string(), text_style),
            ]));
            for segment in segments {
                lines.push(Line::from(Span::styled(segment.to_string(), text_style)));
            }
            lines.push(Line::from(""));
        }
        lines
    }

    /// Total rows the bubbles occupy when word-wrapped to `width` columns.
    pub fn wrapped_height(&self, width: u16) -> u16 {
        let total: usize = self
            .turns
            .iter()
            .map(|turn| {
                let label = format!("{}: ", turn.speaker.display_label());
                let rows: usize = text_lines(&turn.text)
                    .enumerate()
                    .map(|(index, segment)| {
                        if index == 0 {
                            wrapped_line_count(&format!("{label}{segment}"), width)
                        } else {
                            wrapped_line_count(segment, width)
                        }
                    })
                    .sum();
                rows + 1
            })
            .sum();
        total.min(u16::MAX as usize) as u16
    }

    /// Offset from the top to hand to `Paragraph::scroll`.
    pub fn scroll_offset(&self, width: u16, height: u16) -> u16 {
        let max_offset = self.wrapped_height(width).saturating_sub(height);
        max_offset.saturating_sub(self.scroll_back)
    }

    pub fn scroll_up(&mut self, lines: u16, width: u16, height: u16) {
        let max_offset = self.wrapped_height(width).saturating_sub(height);
        self.scroll_back = self.scroll_back.saturating_add(lines).min(max_offset);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_back = 0;
    }
}

impl Default for BubbleList {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for BubbleList {
    fn render_turn(&mut self, speaker: Speaker, text: &str) {
        self.turns.push(Turn::new(speaker, text));
        self.scroll_to_bottom();
    }

    fn clear(&mut self) {
        self.turns.clear();
        self.scroll_back = 0;
    }
}

fn text_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Rows needed to show `text` with greedy word wrapping at `width` columns.
/// Words wider than a row are broken across rows.
fn wrapped_line_count(text: &str, width: u16) -> usize {
    let width = width.max(1) as usize;
    let mut rows = 1;
    let mut column = 0;

    for word in text.split(' ') {
        let word_width = UnicodeWidthStr::width(word);
        let needed = if column == 0 { word_width } else { column + 1 + word_width };

        if needed <= width {
            column = needed;
        } else if word_width <= width {
            rows += 1;
            column = word_width;
        } else {
            if column > 0 {
                rows += 1;
            }
            rows += (word_width - 1) / width;
            column = word_width % width;
            if column == 0 {
                column = width;
            }
        }
    }

    rows
}
