//! Chat thread for the selected conversation, with the composer below it.

use inbox_engine::{Conversation, ConversationStore, Message, Sender};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{InputBox, Pane, TextInputState};
use crate::text::wrap_text;
use crate::theme::{BorderSet, IconSet, Theme};

/// Composer height bounds, borders included.
const COMPOSER_MIN_HEIGHT: u16 = 3;
const COMPOSER_MAX_HEIGHT: u16 = 7;

pub struct ThreadView<'a> {
    store: &'a ConversationStore,
    composer: &'a TextInputState,
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
    focused: bool,
    window: usize,
}

impl<'a> ThreadView<'a> {
    pub fn new(
        store: &'a ConversationStore,
        composer: &'a TextInputState,
        theme: &'a Theme,
        icons: &'a IconSet,
        borders: &'a BorderSet,
    ) -> Self {
        Self {
            store,
            composer,
            theme,
            icons,
            borders,
            focused: false,
            window: 5,
        }
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// How many of the latest messages to show.
    #[must_use]
    pub fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    fn message_lines(&self, convo: &Conversation, width: usize) -> Vec<Line<'static>> {
        let skip = convo.messages.len().saturating_sub(self.window);
        let mut lines = Vec::new();
        for message in &convo.messages[skip..] {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            match message.sender {
                Sender::User => self.push_user(&mut lines, convo, message, width),
                Sender::Admin | Sender::Ai => self.push_outgoing(&mut lines, message, width),
            }
        }
        lines
    }

    fn push_user(
        &self,
        lines: &mut Vec<Line<'static>>,
        convo: &Conversation,
        message: &Message,
        width: usize,
    ) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", convo.user.initial()),
                Style::default()
                    .fg(self.theme.user_message)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} · {}", convo.user.name, message.timestamp),
                Style::default().fg(self.theme.muted),
            ),
        ]));
        let body = Style::default().fg(self.theme.text);
        let wrap_width = (width * 3 / 4).max(1);
        for line in wrap_text(&message.text, wrap_width) {
            lines.push(Line::from(vec![Span::raw("  "), Span::styled(line, body)]));
        }
    }

    fn push_outgoing(&self, lines: &mut Vec<Line<'static>>, message: &Message, width: usize) {
        let color = if message.sender == Sender::Ai {
            self.theme.assistant
        } else {
            self.theme.admin_message
        };
        let wrap_width = (width * 3 / 4).max(1);
        for line in wrap_text(&message.text, wrap_width) {
            lines.push(
                Line::from(Span::styled(line, Style::default().fg(color)))
                    .alignment(Alignment::Right),
            );
        }
        let meta = if message.seen {
            format!("Seen · {}", message.timestamp)
        } else {
            message.timestamp.to_string()
        };
        let meta = if message.sender == Sender::Ai {
            format!("{} {meta}", self.icons.assistant())
        } else {
            meta
        };
        lines.push(
            Line::from(Span::styled(meta, Style::default().fg(self.theme.muted)))
                .alignment(Alignment::Right),
        );
    }

    fn composer_height(&self, area: Rect) -> u16 {
        let rows = u16::try_from(self.composer.content().split('\n').count()).unwrap_or(u16::MAX);
        rows.saturating_add(2)
            .clamp(COMPOSER_MIN_HEIGHT, COMPOSER_MAX_HEIGHT)
            .min(area.height / 2)
    }
}

impl Widget for ThreadView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(self.composer_height(area))])
            .split(area);

        let selected = self.store.selected_conversation();
        let (title, placeholder) = match selected {
            Some(convo) => (
                format!(" {} · {} ", convo.user.name, convo.user.company),
                format!("Reply to {}...", convo.user.name),
            ),
            None => (
                " Conversation ".to_string(),
                "Select a conversation first".to_string(),
            ),
        };

        let pane = Pane::new(self.theme, self.borders)
            .title(title)
            .focused(self.focused);
        match selected {
            Some(convo) => {
                let width = usize::from(chunks[0].width.saturating_sub(2));
                pane.lines(self.message_lines(convo, width))
                    .stick_to_bottom(true)
                    .render(chunks[0], buf);
            }
            None => {
                let block = pane.block();
                let inner = block.inner(chunks[0]);
                block.render(chunks[0], buf);
                let mid = Rect {
                    y: inner.y + inner.height / 2,
                    height: inner.height.min(1),
                    ..inner
                };
                Paragraph::new("Select a conversation to get started")
                    .style(Style::default().fg(self.theme.muted))
                    .alignment(Alignment::Center)
                    .render(mid, buf);
            }
        }

        InputBox::new(self.composer, self.theme, self.borders)
            .focused(self.focused)
            .placeholder(&placeholder)
            .cursor(self.icons.cursor())
            .render(chunks[1], buf);
    }
}
