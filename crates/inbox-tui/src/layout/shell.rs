//! Main shell layout.
//!
//! Regions:
//! 1. Columns (wide): Sidebar | Mentions (optional) | Thread | Assistant or rail
//! 2. Columns (narrow): the focused pane alone
//! 3. Footer (bottom, 1 line)

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

use super::modes::{FocusedPane, LayoutMode};
use crate::app::App;
use crate::widgets::{
    hints_for_focus, AssistantPanel, AssistantRail, FooterHints, MentionsPanel, Sidebar,
    ThreadView,
};

/// Minimum terminal width.
pub const MIN_WIDTH: u16 = 40;
/// Minimum terminal height.
pub const MIN_HEIGHT: u16 = 12;

const SIDEBAR_WIDTH: u16 = 28;
const SIDEBAR_RAIL_WIDTH: u16 = 5;
const MENTIONS_WIDTH: u16 = 28;
const ASSISTANT_WIDTH: u16 = 36;
const ASSISTANT_RAIL_WIDTH: u16 = 3;

const HELP_TEXT: &str = "
  Tab / Shift+Tab    Next/prev pane
  j/k or Up/Down     Move in lists
  Enter              Open / send / ask
  Shift+Enter        Newline (Ctrl+J)
  F2                 Toggle assistant
  F3                 Toggle mentions
  F4                 Collapse sidebar
  F5                 Toggle automation
  Ctrl+T             Copilot / Details
  Ctrl+A             Add suggestion
  Ctrl+S             Suggested query
  Ctrl+W             Close conversation
  Esc                Back / quit
  ? or F1            This help

  [Press any key to close]
";

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Render the whole app into the frame.
pub fn render_shell(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    render_app(app, area, frame.buffer_mut());
}

/// Render the whole app into a buffer region.
pub fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(app, area, buf);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    match app.layout_mode {
        LayoutMode::Wide => render_wide(app, chunks[0], buf),
        LayoutMode::Narrow => render_narrow(app, chunks[0], buf),
    }

    let hints = hints_for_focus(app.focus, app.assistant_tab);
    FooterHints::new(&hints, &app.theme)
        .focused_pane(app.focus)
        .layout_mode(app.layout_mode)
        .automation(app.store.automation_on())
        .notification(app.notification.as_deref())
        .render(chunks[1], buf);

    if app.show_help {
        render_help_overlay(app, area, buf);
    }
}

fn render_wide(app: &App, area: Rect, buf: &mut Buffer) {
    let mut constraints = vec![Constraint::Length(if app.sidebar_collapsed {
        SIDEBAR_RAIL_WIDTH
    } else {
        SIDEBAR_WIDTH
    })];
    if app.show_mentions {
        constraints.push(Constraint::Length(MENTIONS_WIDTH));
    }
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(if app.session.is_some() {
        ASSISTANT_WIDTH
    } else {
        ASSISTANT_RAIL_WIDTH
    }));

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    let mut columns = columns.iter().copied();

    if let Some(rect) = columns.next() {
        render_sidebar(app, rect, buf);
    }
    if app.show_mentions {
        if let Some(rect) = columns.next() {
            render_mentions(app, rect, buf);
        }
    }
    if let Some(rect) = columns.next() {
        render_thread(app, rect, buf);
    }
    if let Some(rect) = columns.next() {
        if !render_assistant(app, rect, buf) {
            AssistantRail::new(&app.theme, &app.icons, &app.borders).render(rect, buf);
        }
    }
}

fn render_narrow(app: &App, area: Rect, buf: &mut Buffer) {
    match app.focus {
        FocusedPane::Sidebar => render_sidebar(app, area, buf),
        FocusedPane::Mentions if app.show_mentions => render_mentions(app, area, buf),
        FocusedPane::Assistant if app.session.is_some() => {
            render_assistant(app, area, buf);
        }
        _ => render_thread(app, area, buf),
    }
}

fn render_sidebar(app: &App, area: Rect, buf: &mut Buffer) {
    let narrow = app.layout_mode == LayoutMode::Narrow;
    Sidebar::new(&app.store, &app.theme, &app.icons, &app.borders)
        .focused(app.focus == FocusedPane::Sidebar)
        .selected_row(app.list_index)
        .collapsed(app.sidebar_collapsed && !narrow)
        .render(area, buf);
}

fn render_mentions(app: &App, area: Rect, buf: &mut Buffer) {
    let mentions = app.store.mentions();
    MentionsPanel::new(&mentions, &app.theme, &app.icons, &app.borders)
        .focused(app.focus == FocusedPane::Mentions)
        .selected_row(app.mentions_index)
        .render(area, buf);
}

fn render_thread(app: &App, area: Rect, buf: &mut Buffer) {
    ThreadView::new(
        &app.store,
        &app.composer,
        &app.theme,
        &app.icons,
        &app.borders,
    )
    .focused(app.focus == FocusedPane::Thread)
    .window(app.thread_window)
    .render(area, buf);
}

/// Render the assistant panel if a session is mounted.
fn render_assistant(app: &App, area: Rect, buf: &mut Buffer) -> bool {
    let Some(session) = &app.session else {
        return false;
    };
    AssistantPanel::new(
        session,
        &app.assistant_input,
        &app.store,
        &app.theme,
        &app.icons,
        &app.borders,
    )
    .focused(app.focus == FocusedPane::Assistant)
    .tab(app.assistant_tab)
    .details_cursor(app.details_cursor)
    .open_section(app.open_section)
    .render(area, buf);
    true
}

fn render_too_small(app: &App, area: Rect, buf: &mut Buffer) {
    let message = format!(
        "Terminal too small ({}x{}). Need at least {MIN_WIDTH}x{MIN_HEIGHT}.",
        area.width, area.height
    );
    Paragraph::new(message)
        .style(Style::default().fg(app.theme.warning).bg(app.theme.base))
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

/// Render the help overlay.
fn render_help_overlay(app: &App, area: Rect, buf: &mut Buffer) {
    let width = 44.min(area.width.saturating_sub(4));
    let height = 19.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(app.theme.primary))
        .borders(Borders::ALL)
        .border_set(app.borders.focused())
        .border_style(Style::default().fg(app.theme.border_focused))
        .style(Style::default().bg(app.theme.overlay));

    Paragraph::new(HELP_TEXT)
        .block(block)
        .style(Style::default().fg(app.theme.text))
        .render(overlay_area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_size_constants() {
        assert_eq!(MIN_WIDTH, 40);
        assert_eq!(MIN_HEIGHT, 12);
    }

    #[test]
    fn test_centered_fixed() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_fixed(40, 10, area), Rect::new(30, 15, 40, 10));
        // clamped to the parent
        assert_eq!(centered_fixed(200, 10, area).width, 100);
    }
}
