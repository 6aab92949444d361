//! Headless mode for the inbox TUI.
//!
//! Runs the app against a `TestBackend` so end-to-end tests and automation
//! can drive it without a terminal. Actions are sent over a channel and the
//! rendered screen is published after every draw.

use crate::app::App;
use crate::event::Action;
use crate::layout::{render_shell, FocusedPane};
use inbox_engine::{InboxConfig, ReplyPhase};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 120;
pub const DEFAULT_HEIGHT: u16 = 30;

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    pub should_quit: bool,
    pub show_help: bool,
    pub focus: FocusedPane,
    /// Thread composer content.
    pub composer: String,
    /// Reply phase of the mounted assistant session.
    pub assistant_phase: Option<ReplyPhase>,
}

/// Handle to control a headless TUI instance.
pub struct HeadlessHandle {
    action_tx: mpsc::UnboundedSender<Action>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send an action to the TUI.
    ///
    /// Returns `true` if the action was sent successfully.
    pub fn send_action(&self, action: Action) -> bool {
        self.action_tx.send(action).is_ok()
    }

    /// Send each character of `text` as input.
    pub fn type_text(&self, text: &str) -> bool {
        text.chars().all(|c| self.send_action(Action::Input(c)))
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            match tokio::time::timeout(remaining, self.state_rx.changed()).await {
                Ok(Ok(())) => {}
                // timed out or the TUI task ended
                Ok(Err(_)) | Err(_) => return None,
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen_contents.contains(text), timeout)
            .await
    }

    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    pub width: u16,
    pub height: u16,
    /// Tick rate in milliseconds.
    pub tick_rate_ms: u64,
    pub inbox: InboxConfig,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate_ms: 50,
            inbox: InboxConfig::default(),
        }
    }
}

/// Run the TUI in headless mode.
///
/// Returns a handle to control the TUI and a join handle for the background
/// task.
///
/// ```ignore
/// let (mut handle, task) = run_tui_headless(HeadlessConfig::default());
/// handle.send_action(Action::ToggleAssistant);
/// handle.wait_for_text("AI Copilot", Duration::from_secs(1)).await;
/// handle.send_action(Action::Quit);
/// task.await.unwrap();
/// ```
pub fn run_tui_headless(
    config: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let task = tokio::spawn(async move {
        run_headless_loop(config, action_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    let handle = HeadlessHandle {
        action_tx,
        state_rx,
    };

    (handle, task)
}

async fn run_headless_loop(
    config: HeadlessConfig,
    mut action_rx: mpsc::UnboundedReceiver<Action>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(config.width, config.height);
    let mut terminal = Terminal::new(backend)?;

    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
    let mut app = App::new(&config.inbox, timer_tx);
    app.handle_resize(config.width, config.height);

    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_rate_ms));

    loop {
        terminal.draw(|frame| render_shell(frame, &app))?;

        let _ = state_tx.send(HeadlessState {
            screen_contents: buffer_to_string(terminal.backend().buffer()),
            should_quit: app.should_quit,
            show_help: app.show_help,
            focus: app.focus,
            composer: app.composer.content().to_string(),
            assistant_phase: app.session.as_ref().map(|s| s.phase()),
        });

        if app.should_quit {
            break;
        }

        tokio::select! {
            action = action_rx.recv() => match action {
                Some(action) => app.handle_action(action),
                // every handle dropped
                None => break,
            },
            Some(event) = timer_rx.recv() => app.handle_timer_event(event),
            _ = ticker.tick() => app.on_tick(),
        }
    }

    Ok(())
}

/// Convert a terminal buffer to text, one row per line with trailing
/// whitespace trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}
