//! Bordered pane with an optional title and prebuilt content lines.
//!
//! Every column of the inbox is a `Pane`; focused panes get the emphasised
//! border set.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::{BorderSet, Theme};

pub struct Pane<'a> {
    title: Option<Line<'a>>,
    focused: bool,
    lines: Vec<Line<'a>>,
    /// Keep the last lines visible when content overflows.
    stick_to_bottom: bool,
    theme: &'a Theme,
    borders: &'a BorderSet,
}

impl<'a> Pane<'a> {
    pub fn new(theme: &'a Theme, borders: &'a BorderSet) -> Self {
        Self {
            title: None,
            focused: false,
            lines: Vec::new(),
            stick_to_bottom: false,
            theme,
            borders,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<Line<'a>>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn lines(mut self, lines: Vec<Line<'a>>) -> Self {
        self.lines = lines;
        self
    }

    #[must_use]
    pub fn stick_to_bottom(mut self, stick: bool) -> Self {
        self.stick_to_bottom = stick;
        self
    }

    /// The bordered block this pane draws, for callers laying out their own
    /// content inside it.
    pub fn block(&self) -> Block<'a> {
        let (border_set, border_color, title_color) = if self.focused {
            (
                self.borders.focused(),
                self.theme.border_focused,
                self.theme.primary,
            )
        } else {
            (self.borders.normal(), self.theme.border, self.theme.subtext)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_set(border_set)
            .border_style(Style::default().fg(border_color));
        if let Some(title) = &self.title {
            block = block
                .title(title.clone())
                .title_style(Style::default().fg(title_color));
        }
        block
    }
}

impl Widget for Pane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let overflow = self.lines.len().saturating_sub(usize::from(inner.height));
        let scroll = if self.stick_to_bottom { overflow } else { 0 };
        Paragraph::new(self.lines)
            .style(Style::default().fg(self.theme.text))
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .render(inner, buf);
    }
}
