//! Assistant side panel.
//!
//! Two tabs share the column:
//! - AI Copilot: session entries, the streaming placeholder with a cursor
//!   block, settled suggestions and the query input
//! - Details: assignee header and collapsible sections, one open at a time
//!
//! [`AssistantRail`] stands in for the panel while it is closed.

use inbox_engine::{
    AssistantEntry, AssistantSession, ConversationStore, ReplyPhase, SUGGESTED_QUERIES,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{InputBox, Pane, TextInputState};
use crate::layout::AssistantTab;
use crate::text::{truncate_to_width, wrap_styled, wrap_with_marker};
use crate::theme::{BorderSet, IconSet, Theme};

/// Collapsible sections of the Details tab, in display order.
pub const DETAIL_SECTIONS: &[&str] = &[
    "LINKS",
    "USER DATA",
    "CONVERSATION ATTRIBUTES",
    "COMPANY DETAILS",
    "SALESFORCE",
    "STRIPE",
    "JIRA FOR TICKETS",
];

/// Body lines of an open Details section.
pub fn section_body(section: &str) -> Vec<String> {
    if section == "LINKS" {
        return ["Tracker ticket", "Back-office tickets", "Side conversations"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
    }
    vec![format!("{section} content goes here.")]
}

pub struct AssistantPanel<'a> {
    session: &'a AssistantSession,
    input: &'a TextInputState,
    store: &'a ConversationStore,
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
    focused: bool,
    tab: AssistantTab,
    details_cursor: usize,
    open_section: Option<usize>,
}

impl<'a> AssistantPanel<'a> {
    pub fn new(
        session: &'a AssistantSession,
        input: &'a TextInputState,
        store: &'a ConversationStore,
        theme: &'a Theme,
        icons: &'a IconSet,
        borders: &'a BorderSet,
    ) -> Self {
        Self {
            session,
            input,
            store,
            theme,
            icons,
            borders,
            focused: false,
            tab: AssistantTab::Copilot,
            details_cursor: 0,
            open_section: None,
        }
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn tab(mut self, tab: AssistantTab) -> Self {
        self.tab = tab;
        self
    }

    #[must_use]
    pub fn details_cursor(mut self, row: usize) -> Self {
        self.details_cursor = row;
        self
    }

    #[must_use]
    pub fn open_section(mut self, section: Option<usize>) -> Self {
        self.open_section = section;
        self
    }

    fn tab_line(&self) -> Line<'a> {
        let style_for = |tab: AssistantTab| {
            if tab == self.tab {
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(self.theme.muted)
            }
        };
        Line::from(vec![
            Span::styled("AI Copilot", style_for(AssistantTab::Copilot)),
            Span::styled(
                format!(" {} ", self.icons.separator()),
                Style::default().fg(self.theme.border),
            ),
            Span::styled("Details", style_for(AssistantTab::Details)),
        ])
    }

    fn entry_lines(&self, entry: &AssistantEntry, width: usize) -> Vec<Line<'static>> {
        if !entry.is_assistant {
            return wrap_styled(
                &entry.text,
                width,
                "> ",
                Style::default().fg(self.theme.subtext),
            );
        }

        let text_style = Style::default().fg(self.theme.assistant);
        let mut lines = vec![Line::from(Span::styled(
            format!("{} Copilot", self.icons.assistant()),
            text_style.add_modifier(Modifier::BOLD),
        ))];

        if entry.is_revealing {
            let cursor = Span::styled(self.icons.cursor(), Style::default().fg(self.theme.primary));
            lines.extend(wrap_with_marker(&entry.text, width, "  ", text_style, cursor));
            return lines;
        }

        lines.extend(wrap_styled(&entry.text, width, "  ", text_style));
        if let Some(suggestion) = &entry.suggestion_text {
            if *suggestion != entry.text {
                lines.extend(wrap_styled(
                    suggestion,
                    width,
                    &format!("  {} ", self.icons.separator()),
                    Style::default().fg(self.theme.text),
                ));
            }
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("[Ctrl+A]", Style::default().fg(self.theme.primary)),
                Span::styled(" Add to composer", Style::default().fg(self.theme.muted)),
            ]));
        }
        lines
    }

    fn copilot_lines(&self, width: usize) -> Vec<Line<'static>> {
        let entries = self.session.entries();
        if entries.is_empty() {
            return vec![Line::from(Span::styled(
                "Ask about this conversation.",
                Style::default().fg(self.theme.muted),
            ))];
        }

        let mut lines = Vec::new();
        for entry in entries {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.extend(self.entry_lines(entry, width));
        }
        if self.session.phase() == ReplyPhase::Waiting {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("{} Thinking...", self.icons.assistant()),
                Style::default().fg(self.theme.muted),
            )));
        }
        lines
    }

    fn render_copilot(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area);

        let width = usize::from(chunks[0].width);
        let lines = self.copilot_lines(width);
        let overflow = lines.len().saturating_sub(usize::from(chunks[0].height));
        Paragraph::new(lines)
            .scroll((u16::try_from(overflow).unwrap_or(u16::MAX), 0))
            .render(chunks[0], buf);

        if let Some(query) = SUGGESTED_QUERIES.first() {
            let chip = truncate_to_width(&format!("Suggested: {query}"), width.saturating_sub(9));
            Paragraph::new(Line::from(vec![
                Span::styled(chip, Style::default().fg(self.theme.secondary)),
                Span::styled(" [Ctrl+S]", Style::default().fg(self.theme.muted)),
            ]))
            .render(chunks[1], buf);
        }

        InputBox::new(self.input, self.theme, self.borders)
            .focused(self.focused)
            .placeholder("Ask a question...")
            .cursor(self.icons.cursor())
            .render(chunks[2], buf);
    }

    /// Details tab lines and the row index of the highlighted section.
    fn details_lines(&self, width: usize) -> (Vec<Line<'static>>, usize) {
        let label = Style::default().fg(self.theme.muted);
        let value = Style::default().fg(self.theme.text);
        let assignee = self
            .store
            .selected_conversation()
            .and_then(|c| c.assignee.clone())
            .unwrap_or_else(|| "Unassigned".to_string());

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Assignee  ", label),
                Span::styled(assignee, value),
            ]),
            Line::from(vec![
                Span::styled("Team      ", label),
                Span::styled("Unassigned", value),
            ]),
            Line::default(),
        ];

        let mut cursor_row = 0;
        for (index, section) in DETAIL_SECTIONS.iter().enumerate() {
            if index == self.details_cursor {
                cursor_row = lines.len();
            }
            let open = self.open_section == Some(index);
            let highlighted = self.focused && index == self.details_cursor;
            let icon = if open {
                self.icons.expanded()
            } else {
                self.icons.collapsed()
            };
            let mut style = Style::default().fg(self.theme.subtext);
            if highlighted {
                style = style.fg(self.theme.primary).add_modifier(Modifier::BOLD);
            }
            lines.push(Line::from(Span::styled(format!("{icon} {section}"), style)));
            if open {
                for body in section_body(section) {
                    lines.extend(wrap_styled(&body, width, "    ", value));
                }
            }
        }
        (lines, cursor_row)
    }
}

impl Widget for AssistantPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let pane = Pane::new(self.theme, self.borders)
            .title(format!(" {} Assistant ", self.icons.assistant()))
            .focused(self.focused);
        let block = pane.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);
        Paragraph::new(self.tab_line()).render(chunks[0], buf);

        match self.tab {
            AssistantTab::Copilot => self.render_copilot(chunks[1], buf),
            AssistantTab::Details => {
                let (lines, cursor_row) = self.details_lines(usize::from(chunks[1].width));
                let scroll = (cursor_row + 1).saturating_sub(usize::from(chunks[1].height));
                Paragraph::new(lines)
                    .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
                    .render(chunks[1], buf);
            }
        }
    }
}

/// Collapsed stand-in for the closed assistant panel.
pub struct AssistantRail<'a> {
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
}

impl<'a> AssistantRail<'a> {
    pub fn new(theme: &'a Theme, icons: &'a IconSet, borders: &'a BorderSet) -> Self {
        Self {
            theme,
            icons,
            borders,
        }
    }
}

impl Widget for AssistantRail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let icon = Line::from(Span::styled(
            self.icons.assistant(),
            Style::default().fg(self.theme.assistant),
        ));
        Pane::new(self.theme, self.borders)
            .lines(vec![icon])
            .render(area, buf);
    }
}
