//! Inbox sidebar: navigation entries and the conversation list.
//!
//! Collapses to a rail of user initials.

use inbox_engine::{Conversation, ConversationStore, Presence};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::Pane;
use crate::text::{fit_width, truncate_to_width, visual_width};
use crate::theme::{BorderSet, IconMode, IconSet, Theme};

/// Rows each conversation occupies in the expanded list.
const ROWS_PER_CONVERSATION: usize = 2;

pub struct Sidebar<'a> {
    store: &'a ConversationStore,
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
    focused: bool,
    selected_row: usize,
    collapsed: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(
        store: &'a ConversationStore,
        theme: &'a Theme,
        icons: &'a IconSet,
        borders: &'a BorderSet,
    ) -> Self {
        Self {
            store,
            theme,
            icons,
            borders,
            focused: false,
            selected_row: 0,
            collapsed: false,
        }
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Highlighted row of the conversation list.
    #[must_use]
    pub fn selected_row(mut self, row: usize) -> Self {
        self.selected_row = row;
        self
    }

    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Navigation entries with their badge counts.
    fn nav_entries(&self) -> Vec<(&'static str, Option<usize>)> {
        let conversations = self.store.conversations();
        let unseen = self.store.mentions().iter().filter(|m| m.unseen).count();
        let unassigned = conversations.iter().filter(|c| c.assignee.is_none()).count();
        vec![
            ("Your inbox", Some(self.store.unread_count())),
            ("Mentions", Some(unseen)),
            ("Created by you", Some(0)),
            ("All", Some(conversations.len())),
            ("Unassigned", Some(unassigned)),
            ("Dashboard", None),
            ("Settings", None),
        ]
    }

    fn nav_lines(&self, width: usize) -> Vec<Line<'a>> {
        self.nav_entries()
            .into_iter()
            .map(|(label, badge)| {
                let badge = badge.map(|n| n.to_string()).unwrap_or_default();
                let label_width = width.saturating_sub(visual_width(&badge) + 1);
                Line::from(vec![
                    Span::styled(
                        fit_width(&format!(" {label}"), label_width),
                        Style::default().fg(self.theme.subtext),
                    ),
                    Span::styled(badge, Style::default().fg(self.theme.primary)),
                ])
            })
            .collect()
    }

    fn conversation_lines(&self, convo: &Conversation, row: usize, width: usize) -> [Line<'a>; 2] {
        let highlighted = self.focused && row == self.selected_row;
        let selected = self.store.selected_id() == Some(convo.id.as_str());

        let marker = if highlighted || selected {
            self.icons.selected()
        } else {
            " "
        };
        let marker_color = if highlighted {
            self.theme.primary
        } else {
            self.theme.secondary
        };
        let presence_color = match convo.user.status {
            Presence::Online => self.theme.success,
            Presence::Away => self.theme.warning,
            Presence::Offline => self.theme.muted,
        };

        let mut name_style = Style::default().fg(self.theme.text);
        if convo.unread {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }
        let unread = if convo.unread { self.icons.unread() } else { "" };
        let title_width = width.saturating_sub(4 + visual_width(unread));
        let title = format!("{} · {}", convo.user.name, convo.user.company);

        let header = Line::from(vec![
            Span::styled(marker, Style::default().fg(marker_color)),
            Span::styled(
                self.icons.presence(convo.user.status),
                Style::default().fg(presence_color),
            ),
            Span::raw(" "),
            Span::styled(fit_width(&title, title_width), name_style),
            Span::styled(unread, Style::default().fg(self.theme.info)),
        ]);

        let tags: String = convo.tags.iter().map(|t| format!(" #{t}")).collect();
        let preview_width = width.saturating_sub(3 + visual_width(&tags));
        let preview = convo
            .last_message()
            .map_or("No messages yet", |m| m.text.as_str());
        let detail = Line::from(vec![
            Span::styled(marker, Style::default().fg(marker_color)),
            Span::raw("  "),
            Span::styled(
                truncate_to_width(preview, preview_width),
                Style::default().fg(self.theme.muted),
            ),
            Span::styled(tags, Style::default().fg(self.theme.secondary)),
        ]);

        [header, detail]
    }

    fn render_rail(self, area: Rect, buf: &mut Buffer) {
        let pane = Pane::new(self.theme, self.borders).focused(self.focused);
        let lines = self
            .store
            .conversations()
            .iter()
            .map(|convo| {
                let selected = self.store.selected_id() == Some(convo.id.as_str());
                let style = if selected {
                    Style::default()
                        .fg(self.theme.primary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.subtext)
                };
                let unread = if convo.unread { self.icons.unread() } else { " " };
                Line::from(vec![
                    Span::styled(convo.user.initial().to_string(), style),
                    Span::styled(unread, Style::default().fg(self.theme.info)),
                ])
            })
            .collect();
        pane.lines(lines).render(area, buf);
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.collapsed {
            self.render_rail(area, buf);
            return;
        }

        let pane = Pane::new(self.theme, self.borders)
            .title(" Inbox ")
            .focused(self.focused);
        let block = pane.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let width = usize::from(inner.width);
        let rule = match self.icons.mode() {
            IconMode::Unicode => "─",
            IconMode::Ascii => "-",
        };
        let mut lines = self.nav_lines(width);
        lines.push(Line::from(Span::styled(
            rule.repeat(width),
            Style::default().fg(self.theme.border),
        )));
        let list_start = lines.len();
        for (row, convo) in self.store.conversations().iter().enumerate() {
            lines.extend(self.conversation_lines(convo, row, width));
        }

        // keep the highlighted conversation on screen
        let height = usize::from(inner.height);
        let row_end = list_start + (self.selected_row + 1) * ROWS_PER_CONVERSATION;
        let scroll = row_end.saturating_sub(height);

        Paragraph::new(lines)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .render(inner, buf);
    }
}
