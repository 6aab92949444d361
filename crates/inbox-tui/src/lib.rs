//! inbox-tui: Terminal UI for the support inbox
//!
//! This crate provides the TUI layer, including:
//! - Sidebar, thread, mentions and assistant panes
//! - Wide and narrow layouts with a help overlay
//! - Headless mode for testing and automation

mod app;
mod event;
pub mod headless;
mod layout;
mod text;
mod theme;
#[cfg(test)]
pub mod test_utils;
mod widgets;

pub use app::App;
pub use event::{key_to_action, Action, Event, EventHandler};
pub use inbox_engine;
pub use layout::{AssistantTab, FocusedPane, LayoutMode};

use crossterm::{
    cursor::Show as ShowCursor,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use inbox_engine::{InboxConfig, TimerEvent};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tokio::sync::mpsc;
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit.
pub async fn run_tui(config: &InboxConfig) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
    let mut app = App::new(config, timer_tx);
    let size = terminal.size()?;
    app.handle_resize(size.width, size.height);

    let mut events = EventHandler::new(config.tick_rate());
    info!(width = size.width, height = size.height, "tui started");

    let result = run_loop(&mut terminal, &mut app, &mut events, &mut timer_rx).await;

    terminal.show_cursor()?;
    info!("tui stopped");
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    timer_rx: &mut mpsc::UnboundedReceiver<TimerEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| layout::render_shell(frame, app))?;

        if app.should_quit {
            break;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(Event::Key(key)) => app.handle_key(key),
                Some(Event::Resize(width, height)) => app.handle_resize(width, height),
                Some(Event::Tick) => app.on_tick(),
                None => break,
            },
            Some(timer_event) = timer_rx.recv() => app.handle_timer_event(timer_event),
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
