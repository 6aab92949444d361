//! Footer status bar.
//!
//! Format: `Thread │ Wide │ Auto off │ <notification>      [Enter] Send │ [F1] Help`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::layout::{AssistantTab, FocusedPane, LayoutMode};
use crate::text::visual_width;
use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Tab", "Ctrl+A").
    pub key: String,
    /// The action description (e.g., "Focus", "Add to composer").
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    focused_pane: Option<FocusedPane>,
    layout_mode: Option<LayoutMode>,
    automation: Option<bool>,
    notification: Option<&'a str>,
}

impl<'a> FooterHints<'a> {
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            focused_pane: None,
            layout_mode: None,
            automation: None,
            notification: None,
        }
    }

    #[must_use]
    pub fn focused_pane(mut self, pane: FocusedPane) -> Self {
        self.focused_pane = Some(pane);
        self
    }

    #[must_use]
    pub fn layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn automation(mut self, on: bool) -> Self {
        self.automation = Some(on);
        self
    }

    #[must_use]
    pub fn notification(mut self, message: Option<&'a str>) -> Self {
        self.notification = message;
        self
    }

    fn left_spans(&self) -> Vec<Span<'a>> {
        let sep = Style::default().fg(self.theme.muted);
        let mut parts: Vec<Span<'a>> = Vec::new();

        if let Some(pane) = self.focused_pane {
            parts.push(Span::styled(pane.label(), Style::default().fg(self.theme.primary)));
        }
        if let Some(mode) = self.layout_mode {
            let label = match mode {
                LayoutMode::Wide => "Wide",
                LayoutMode::Narrow => "Narrow",
            };
            parts.push(Span::styled(label, Style::default().fg(self.theme.subtext)));
        }
        if let Some(on) = self.automation {
            let (label, color) = if on {
                ("Auto on", self.theme.success)
            } else {
                ("Auto off", self.theme.muted)
            };
            parts.push(Span::styled(label, Style::default().fg(color)));
        }
        if let Some(message) = self.notification {
            parts.push(Span::styled(message, Style::default().fg(self.theme.warning)));
        }

        let mut spans = Vec::with_capacity(parts.len() * 2);
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", sep));
            }
            spans.push(part);
        }
        spans
    }

    fn right_spans(&self) -> Vec<Span<'a>> {
        let mut spans = Vec::new();
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }
            spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            spans.push(Span::styled(
                hint.key.as_str(),
                Style::default().fg(self.theme.primary),
            ));
            spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            spans.push(Span::styled(
                hint.action.as_str(),
                Style::default().fg(self.theme.subtext),
            ));
        }
        spans
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut left = self.left_spans();
        let right = self.right_spans();

        let width = |spans: &[Span<'_>]| -> usize {
            spans.iter().map(|s| visual_width(&s.content)).sum()
        };
        let total = usize::from(area.width);
        let (lw, rw) = (width(&left), width(&right));

        // drop the hints rather than overlap the status
        if lw + rw + 1 <= total {
            left.push(Span::raw(" ".repeat(total - lw - rw)));
            left.extend(right);
        }

        Paragraph::new(Line::from(left))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}

/// Hints for the focused pane.
pub fn hints_for_focus(focused: FocusedPane, tab: AssistantTab) -> Vec<KeyHint> {
    let mut hints = match focused {
        FocusedPane::Sidebar | FocusedPane::Mentions => vec![
            KeyHint::new("j/k", "Navigate"),
            KeyHint::new("Enter", "Open"),
        ],
        FocusedPane::Thread => vec![
            KeyHint::new("Enter", "Send"),
            KeyHint::new("Ctrl+J", "Newline"),
        ],
        FocusedPane::Assistant => match tab {
            AssistantTab::Copilot => vec![
                KeyHint::new("Enter", "Ask"),
                KeyHint::new("Ctrl+A", "Add to composer"),
                KeyHint::new("Ctrl+T", "Details"),
            ],
            AssistantTab::Details => vec![
                KeyHint::new("Enter", "Expand"),
                KeyHint::new("Ctrl+T", "Copilot"),
            ],
        },
    };
    hints.push(KeyHint::new("Tab", "Focus"));
    hints.push(KeyHint::new("F1", "Help"));
    hints
}
