//! Mentions panel: one row per conversation, flagged while it has unseen messages.

use inbox_engine::Mention;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::Pane;
use crate::text::{fit_width, truncate_to_width, visual_width};
use crate::theme::{BorderSet, IconSet, Theme};

pub struct MentionsPanel<'a> {
    mentions: &'a [Mention],
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
    focused: bool,
    selected_row: usize,
}

impl<'a> MentionsPanel<'a> {
    pub fn new(
        mentions: &'a [Mention],
        theme: &'a Theme,
        icons: &'a IconSet,
        borders: &'a BorderSet,
    ) -> Self {
        Self {
            mentions,
            theme,
            icons,
            borders,
            focused: false,
            selected_row: 0,
        }
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn selected_row(mut self, row: usize) -> Self {
        self.selected_row = row;
        self
    }

    fn unseen_count(&self) -> usize {
        self.mentions.iter().filter(|m| m.unseen).count()
    }
}

impl Widget for MentionsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = usize::from(area.width.saturating_sub(2));
        let mut lines = Vec::with_capacity(self.mentions.len() * 2);

        for (row, mention) in self.mentions.iter().enumerate() {
            let highlighted = self.focused && row == self.selected_row;
            let marker = if highlighted { self.icons.selected() } else { " " };
            let unseen = if mention.unseen { self.icons.unread() } else { " " };
            let timestamp = mention
                .timestamp
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();

            let mut name_style = Style::default().fg(self.theme.text);
            if mention.unseen {
                name_style = name_style.add_modifier(Modifier::BOLD);
            }
            let name_width = width.saturating_sub(3 + visual_width(&timestamp));

            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(self.theme.primary)),
                Span::styled(unseen, Style::default().fg(self.theme.info)),
                Span::raw(" "),
                Span::styled(fit_width(&mention.name, name_width), name_style),
                Span::styled(timestamp, Style::default().fg(self.theme.muted)),
            ]));
            lines.push(Line::from(vec![
                Span::raw("   "),
                Span::styled(
                    truncate_to_width(&mention.preview, width.saturating_sub(3)),
                    Style::default().fg(self.theme.muted),
                ),
            ]));
        }

        Pane::new(self.theme, self.borders)
            .title(format!(" Mentions ({}) ", self.unseen_count()))
            .focused(self.focused)
            .lines(lines)
            .render(area, buf);
    }
}
