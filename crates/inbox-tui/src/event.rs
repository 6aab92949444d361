//! Event handling for the inbox TUI.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A tick event for UI updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Polls the terminal on a blocking thread and forwards events.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // crossterm input is blocking
        std::thread::spawn(move || loop {
            let sent = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(CrosstermEvent::Key(key)) => tx_clone.send(Event::Key(key)),
                    Ok(CrosstermEvent::Resize(w, h)) => tx_clone.send(Event::Resize(w, h)),
                    _ => Ok(()),
                }
            } else {
                tx_clone.send(Event::Tick)
            };
            if sent.is_err() {
                break;
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    /// Close the topmost overlay; quits when nothing is open.
    Back,
    FocusNext,
    FocusPrev,
    ToggleAssistant,
    ToggleMentions,
    ToggleSidebar,
    ToggleAutomation,
    /// Switch between the assistant's Copilot and Details tabs.
    SwitchTab,
    /// Copy the latest assistant suggestion into the composer.
    AddToComposer,
    /// Fill the assistant input with the suggested query.
    UseSuggestedQuery,
    CloseConversation,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    /// Enter: submit the focused input or activate the selected row.
    Submit,
    Newline,
    Backspace,
    Delete,
    Input(char),
    None,
}

/// Convert a key event to an action.
///
/// `typing` is true while a text input has focus; printable characters then
/// become [`Action::Input`] instead of shortcuts.
pub fn key_to_action(key: KeyEvent, typing: bool) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    if ctrl {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('j') | KeyCode::Enter => Action::Newline,
            KeyCode::Char('t') => Action::SwitchTab,
            KeyCode::Char('a') => Action::AddToComposer,
            KeyCode::Char('s') => Action::UseSuggestedQuery,
            KeyCode::Char('w') => Action::CloseConversation,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::F(1) => Action::Help,
        KeyCode::F(2) => Action::ToggleAssistant,
        KeyCode::F(3) => Action::ToggleMentions,
        KeyCode::F(4) => Action::ToggleSidebar,
        KeyCode::F(5) => Action::ToggleAutomation,
        KeyCode::Esc => Action::Back,
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,
        KeyCode::Enter if shift => Action::Newline,
        KeyCode::Enter => Action::Submit,
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Char(c) if typing => Action::Input(c),
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::Help,
        KeyCode::Char('k') => Action::Up,
        KeyCode::Char('j') => Action::Down,
        _ => Action::None,
    }
}
