//! Test utilities for inbox-tui rendering and interaction tests.
//!
//! Helpers for building an app over the seed data, typing into it, and
//! rendering the full shell to text for assertions and snapshots.

use crate::app::App;
use crate::event::Action;
use crate::layout::render_app;
use inbox_engine::{InboxConfig, TimerEvent};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};
use tokio::sync::mpsc;

pub use crate::headless::buffer_to_string;

/// Default terminal width for tests; wide layout.
pub const TEST_WIDTH: u16 = 120;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 30;

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create an app over the seed data with default config.
///
/// The receiver carries reply timer events; tests feed them back by hand
/// or drop it.
pub fn create_test_app() -> (App, mpsc::UnboundedReceiver<TimerEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(&InboxConfig::default(), tx);
    app.handle_resize(TEST_WIDTH, TEST_HEIGHT);
    (app, rx)
}

/// Send each character of `text` as an input action.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_action(Action::Input(c));
    }
}

/// Render the whole app and return it as text.
pub fn render_app_to_string(app: &App, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    render_app(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FocusedPane, LayoutMode};

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_buffer_to_string_trims_lines() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        insta::assert_snapshot!(buffer_to_string(&buffer), @r"
        Hello
        World
        ");
    }

    #[test]
    fn test_wide_render_shows_all_columns() {
        let (app, _rx) = create_test_app();
        let out = render_app_to_string(&app, TEST_WIDTH, TEST_HEIGHT);
        assert!(out.contains("Inbox"));
        assert!(out.contains("Luis · Github"));
        assert!(out.contains("Reply to Luis..."));
        assert!(out.contains("Auto off"));
        // assistant closed: only the rail
        assert!(!out.contains("AI Copilot"));
    }

    #[test]
    fn test_wide_render_with_assistant_and_mentions() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::ToggleMentions);
        app.handle_action(Action::ToggleAssistant);
        let out = render_app_to_string(&app, 140, TEST_HEIGHT);
        assert!(out.contains("Mentions ("));
        assert!(out.contains("AI Copilot"));
        assert!(out.contains("Ask a question..."));
    }

    #[test]
    fn test_narrow_render_single_column() {
        let (mut app, _rx) = create_test_app();
        app.handle_resize(80, 24);
        assert_eq!(app.layout_mode, LayoutMode::Narrow);
        let out = render_app_to_string(&app, 80, 24);
        assert!(out.contains("Reply to Luis..."));
        assert!(!out.contains("Your inbox"));

        app.handle_action(Action::FocusNext);
        assert_eq!(app.focus, FocusedPane::Sidebar);
        let out = render_app_to_string(&app, 80, 24);
        assert!(out.contains("Your inbox"));
        assert!(!out.contains("Reply to Luis..."));
    }

    #[test]
    fn test_narrow_assistant_reopens_as_single_column() {
        let (mut app, _rx) = create_test_app();
        app.handle_resize(80, 24);
        app.handle_action(Action::ToggleAssistant);
        let out = render_app_to_string(&app, 80, 24);
        assert!(out.contains("AI Copilot"));
        assert!(!out.contains("Reply to Luis..."));
    }

    #[test]
    fn test_too_small_notice() {
        let (app, _rx) = create_test_app();
        let out = render_app_to_string(&app, 30, 8);
        assert!(out.contains("Terminal too small"));
    }

    #[test]
    fn test_help_overlay() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::Help);
        let out = render_app_to_string(&app, TEST_WIDTH, TEST_HEIGHT);
        assert!(out.contains("Help"));
        assert!(out.contains("Toggle assistant"));
        assert!(out.contains("[Press any key to close]"));
    }
}
