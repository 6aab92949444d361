//! Bordered multi-line input box.
//!
//! Renders a [`TextInputState`] with a prompt, a cursor block when focused and
//! a placeholder when empty. Used for the thread composer and the assistant
//! query input.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::TextInputState;
use crate::theme::{BorderSet, Theme};

pub struct InputBox<'a> {
    input: &'a TextInputState,
    theme: &'a Theme,
    borders: &'a BorderSet,
    focused: bool,
    placeholder: &'a str,
    cursor: &'a str,
}

impl<'a> InputBox<'a> {
    pub fn new(input: &'a TextInputState, theme: &'a Theme, borders: &'a BorderSet) -> Self {
        Self {
            input,
            theme,
            borders,
            focused: false,
            placeholder: "",
            cursor: "█",
        }
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Symbol drawn at the cursor position.
    #[must_use]
    pub fn cursor(mut self, cursor: &'a str) -> Self {
        self.cursor = cursor;
        self
    }

    /// Display lines and the index of the line holding the cursor.
    fn build_lines(&self) -> (Vec<Line<'a>>, usize) {
        let text = Style::default().fg(self.theme.text);
        let dim = Style::default().fg(self.theme.muted);
        let caret = Style::default().fg(self.theme.primary);

        if self.input.is_empty() {
            let mut spans = vec![Span::styled("> ", caret)];
            if self.focused {
                spans.push(Span::styled(self.cursor, caret));
            }
            spans.push(Span::styled(self.placeholder, dim));
            return (vec![Line::from(spans)], 0);
        }

        let (cursor_line, cursor_col) = self.input.cursor_position();
        let lines = self
            .input
            .content()
            .split('\n')
            .enumerate()
            .map(|(idx, line_text)| {
                let prefix = if idx == 0 { "> " } else { "  " };
                let mut spans = vec![Span::styled(prefix, caret)];
                if self.focused && idx == cursor_line {
                    let before: String = line_text.chars().take(cursor_col).collect();
                    let after: String = line_text.chars().skip(cursor_col).collect();
                    spans.push(Span::styled(before, text));
                    spans.push(Span::styled(self.cursor, caret));
                    spans.push(Span::styled(after, text));
                } else {
                    spans.push(Span::styled(line_text.to_string(), text));
                }
                Line::from(spans)
            })
            .collect();
        (lines, cursor_line)
    }
}

impl Widget for InputBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (border_set, border_color) = if self.focused {
            (self.borders.focused(), self.theme.border_focused)
        } else {
            (self.borders.normal(), self.theme.border)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border_set)
            .border_style(Style::default().fg(border_color));

        let inner_height = usize::from(area.height.saturating_sub(2));
        let (lines, cursor_line) = self.build_lines();

        // keep the cursor line visible
        let scroll = if lines.len() <= inner_height {
            0
        } else {
            cursor_line.saturating_sub(inner_height.saturating_sub(1))
        };

        Paragraph::new(lines)
            .block(block)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .render(area, buf);
    }
}
