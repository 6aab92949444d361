//! Application state and update logic for the inbox TUI.
//!
//! The app owns the conversation store and observes it through a
//! subscription whose events are drained after every action, so panes that
//! mirror store state (the composer, the assistant session) resync no matter
//! which code path mutated the store.

use crossterm::event::KeyEvent;
use inbox_engine::{
    AssistantSession, ConversationStore, ExpandedPanel, InboxConfig, ReplyRules, RevealTimer,
    Schedule, SessionTiming, StoreEvent, TickOutcome, TimerEvent, SUGGESTED_QUERIES,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::event::{key_to_action, Action};
use crate::layout::{AssistantTab, FocusedPane, LayoutMode};
use crate::theme::{BorderSet, IconMode, IconSet, Theme};
use crate::widgets::{TextInputState, DETAIL_SECTIONS};

/// How many ticks a notification stays visible.
const NOTIFICATION_TICKS: usize = 12;

/// Application state.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,

    pub store: ConversationStore,
    store_rx: mpsc::UnboundedReceiver<StoreEvent>,

    /// Present while the assistant panel is mounted.
    pub session: Option<AssistantSession>,
    timer: RevealTimer,
    rules: ReplyRules,
    timing: SessionTiming,

    /// Thread composer, mirrored into the store draft on every edit.
    pub composer: TextInputState,
    /// Assistant query input.
    pub assistant_input: TextInputState,

    pub focus: FocusedPane,
    pub layout_mode: LayoutMode,
    pub sidebar_collapsed: bool,
    pub show_mentions: bool,
    pub assistant_tab: AssistantTab,
    /// Highlighted row of the Details tab.
    pub details_cursor: usize,
    /// The one open Details section, if any.
    pub open_section: Option<usize>,
    /// Highlighted row of the sidebar conversation list.
    pub list_index: usize,
    pub mentions_index: usize,

    pub thread_window: usize,
    narrow_breakpoint: u16,
    pub terminal_size: (u16, u16),

    pub theme: Theme,
    pub icons: IconSet,
    pub borders: BorderSet,

    pub notification: Option<String>,
    notification_ttl: usize,
    pub tick: usize,
}

impl App {
    /// Create an app over the seed conversations.
    ///
    /// Reply timer events are sent on `timer_tx`; the caller feeds them back
    /// through [`App::handle_timer_event`].
    pub fn new(config: &InboxConfig, timer_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self::with_store(ConversationStore::with_seed(), config, timer_tx)
    }

    pub fn with_store(
        mut store: ConversationStore,
        config: &InboxConfig,
        timer_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        let (tx, store_rx) = mpsc::unbounded_channel();
        store.subscribe(move |event| {
            let _ = tx.send(event.clone());
        });

        let mode = IconMode::from(config.icons);
        let theme = if mode == IconMode::Ascii {
            Theme::high_contrast()
        } else {
            Theme::default()
        };
        let composer = {
            let mut input = TextInputState::new();
            input.set_content(store.composer_draft());
            input
        };
        let list_index = store
            .selected_id()
            .and_then(|id| store.conversations().iter().position(|c| c.id == id))
            .unwrap_or(0);

        let mut app = Self {
            should_quit: false,
            show_help: false,
            store,
            store_rx,
            session: None,
            timer: RevealTimer::new(timer_tx),
            rules: ReplyRules::default(),
            timing: config.session_timing(),
            composer,
            assistant_input: TextInputState::new(),
            focus: FocusedPane::Thread,
            layout_mode: LayoutMode::Wide,
            sidebar_collapsed: false,
            show_mentions: false,
            assistant_tab: AssistantTab::Copilot,
            details_cursor: 0,
            open_section: None,
            list_index,
            mentions_index: 0,
            thread_window: config.thread_window,
            narrow_breakpoint: config.narrow_breakpoint,
            terminal_size: (0, 0),
            theme,
            icons: IconSet::new(mode),
            borders: BorderSet::new(mode),
            notification: None,
            notification_ttl: 0,
            tick: 0,
        };
        app.sync_session(app.store.expanded_panel());
        app
    }

    pub fn set_notification(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
        self.notification_ttl = NOTIFICATION_TICKS;
    }

    pub fn assistant_open(&self) -> bool {
        self.store.expanded_panel() == ExpandedPanel::Assistant
    }

    /// Panes that can take focus in the current layout, left to right.
    pub fn visible_panes(&self) -> Vec<FocusedPane> {
        let mut panes = Vec::with_capacity(4);
        let narrow = self.layout_mode == LayoutMode::Narrow;
        if narrow || !self.sidebar_collapsed {
            panes.push(FocusedPane::Sidebar);
        }
        if self.show_mentions {
            panes.push(FocusedPane::Mentions);
        }
        panes.push(FocusedPane::Thread);
        if self.assistant_open() {
            panes.push(FocusedPane::Assistant);
        }
        panes
    }

    /// Whether keystrokes go to a text input.
    pub fn is_typing(&self) -> bool {
        !self.show_help
            && match self.focus {
                FocusedPane::Thread => true,
                FocusedPane::Assistant => self.assistant_tab == AssistantTab::Copilot,
                FocusedPane::Sidebar | FocusedPane::Mentions => false,
            }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = key_to_action(key, self.is_typing());
        self.handle_action(action);
    }

    /// Handle a resolved action.
    pub fn handle_action(&mut self, action: Action) {
        if action == Action::None {
            return;
        }

        if self.show_help {
            // any key closes help; quit still quits
            self.show_help = false;
            if action == Action::Quit {
                self.should_quit = true;
            }
            return;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::Help => self.show_help = true,
            Action::Back => self.back(),
            Action::FocusNext => self.cycle_focus(true),
            Action::FocusPrev => self.cycle_focus(false),
            Action::ToggleAssistant => self.toggle_assistant(),
            Action::ToggleMentions => self.toggle_mentions(),
            Action::ToggleSidebar => self.toggle_sidebar(),
            Action::ToggleAutomation => self.store.toggle_automation(),
            Action::SwitchTab => {
                if self.session.is_some() {
                    self.assistant_tab = self.assistant_tab.toggle();
                }
            }
            Action::AddToComposer => self.add_suggestion_to_composer(),
            Action::UseSuggestedQuery => {
                if self.session.is_some() {
                    self.assistant_input.set_content(SUGGESTED_QUERIES[0]);
                    self.assistant_tab = AssistantTab::Copilot;
                    self.focus = FocusedPane::Assistant;
                }
            }
            Action::CloseConversation => self.store.clear_selection(),
            _ => match self.focus {
                FocusedPane::Sidebar => self.handle_sidebar_action(action),
                FocusedPane::Mentions => self.handle_mentions_action(action),
                FocusedPane::Thread => self.handle_thread_action(action),
                FocusedPane::Assistant => self.handle_assistant_action(action),
            },
        }

        self.process_store_events();
    }

    fn back(&mut self) {
        if self.show_mentions {
            self.show_mentions = false;
            if self.focus == FocusedPane::Mentions {
                self.focus = FocusedPane::Thread;
            }
        } else if self.assistant_open() {
            self.store.set_expanded_panel(ExpandedPanel::None);
            self.focus = FocusedPane::Thread;
        } else if self.focus != FocusedPane::Thread {
            self.focus = FocusedPane::Thread;
        } else {
            self.should_quit = true;
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let visible = self.visible_panes();
        self.focus = self.focus.cycle(&visible, forward);
    }

    fn toggle_assistant(&mut self) {
        self.store.toggle_assistant();
        self.focus = if self.assistant_open() {
            FocusedPane::Assistant
        } else if self.focus == FocusedPane::Assistant {
            FocusedPane::Thread
        } else {
            self.focus
        };
    }

    fn toggle_mentions(&mut self) {
        self.show_mentions = !self.show_mentions;
        if self.show_mentions {
            self.focus = FocusedPane::Mentions;
        } else if self.focus == FocusedPane::Mentions {
            self.focus = FocusedPane::Thread;
        }
    }

    fn toggle_sidebar(&mut self) {
        if self.layout_mode == LayoutMode::Narrow {
            // narrow: show or hide the sidebar column
            self.focus = if self.focus == FocusedPane::Sidebar {
                FocusedPane::Thread
            } else {
                FocusedPane::Sidebar
            };
            return;
        }
        self.sidebar_collapsed = !self.sidebar_collapsed;
        if self.sidebar_collapsed && self.focus == FocusedPane::Sidebar {
            self.focus = FocusedPane::Thread;
        }
    }

    fn add_suggestion_to_composer(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let Some(id) = session.latest_suggestion_id() else {
            self.set_notification("No suggestion yet");
            return;
        };
        if session.add_to_composer(id, &mut self.store) {
            self.focus = FocusedPane::Thread;
            self.set_notification("Suggestion added to composer");
        } else {
            self.set_notification("Select a conversation first");
        }
    }

    fn handle_sidebar_action(&mut self, action: Action) {
        let count = self.store.conversations().len();
        match action {
            Action::Up => self.list_index = self.list_index.saturating_sub(1),
            Action::Down => {
                if self.list_index + 1 < count {
                    self.list_index += 1;
                }
            }
            Action::Submit => {
                let Some(id) = self
                    .store
                    .conversations()
                    .get(self.list_index)
                    .map(|c| c.id.clone())
                else {
                    return;
                };
                if self.store.select_conversation(&id).is_ok() {
                    self.focus = FocusedPane::Thread;
                }
            }
            _ => {}
        }
    }

    fn handle_mentions_action(&mut self, action: Action) {
        let mentions = self.store.mentions();
        match action {
            Action::Up => self.mentions_index = self.mentions_index.saturating_sub(1),
            Action::Down => {
                if self.mentions_index + 1 < mentions.len() {
                    self.mentions_index += 1;
                }
            }
            Action::Submit => {
                let Some(mention) = mentions.get(self.mentions_index) else {
                    return;
                };
                let id = mention.conversation_id.clone();
                match self
                    .store
                    .select_conversation(&id)
                    .and_then(|()| self.store.mark_seen(&id))
                {
                    Ok(()) => debug!(id = %id, "mention opened"),
                    Err(e) => warn!(error = %e, "mention selection failed"),
                }
            }
            _ => {}
        }
    }

    /// Apply an editing action to `input`. Returns true if content changed.
    fn edit(input: &mut TextInputState, action: Action) -> bool {
        match action {
            Action::Input(c) => input.insert(c),
            Action::Newline => input.insert('\n'),
            Action::Backspace => input.backspace(),
            Action::Delete => input.delete(),
            Action::Left => {
                input.move_left();
                return false;
            }
            Action::Right => {
                input.move_right();
                return false;
            }
            Action::Home => {
                input.move_home();
                return false;
            }
            Action::End => {
                input.move_end();
                return false;
            }
            _ => return false,
        }
        true
    }

    fn handle_thread_action(&mut self, action: Action) {
        if action == Action::Submit {
            if self.store.send_message(None).is_none() {
                debug!("composer submit ignored");
            }
            return;
        }
        if Self::edit(&mut self.composer, action) {
            self.store.set_draft(self.composer.content());
        }
    }

    fn handle_assistant_action(&mut self, action: Action) {
        match self.assistant_tab {
            AssistantTab::Copilot => match action {
                Action::Submit => {
                    let query = self.assistant_input.submit();
                    self.ask(&query);
                }
                Action::Up => self.assistant_input.history_prev(),
                Action::Down => self.assistant_input.history_next(),
                _ => {
                    Self::edit(&mut self.assistant_input, action);
                }
            },
            AssistantTab::Details => match action {
                Action::Up => self.details_cursor = self.details_cursor.saturating_sub(1),
                Action::Down => {
                    if self.details_cursor + 1 < DETAIL_SECTIONS.len() {
                        self.details_cursor += 1;
                    }
                }
                Action::Submit => {
                    self.open_section = if self.open_section == Some(self.details_cursor) {
                        None
                    } else {
                        Some(self.details_cursor)
                    };
                }
                _ => {}
            },
        }
    }

    /// Send a query to the mounted assistant session.
    pub fn ask(&mut self, query: &str) {
        let Some(session) = &mut self.session else {
            debug!("ask ignored: assistant panel closed");
            return;
        };
        match session.ask(query) {
            // blank query; any reply in flight keeps its timer
            Schedule::None => {}
            schedule => self.timer.start(schedule),
        }
    }

    /// Feed a reply timer event to the session.
    pub fn handle_timer_event(&mut self, event: TimerEvent) {
        let Some(session) = &mut self.session else {
            return;
        };
        if session.handle_timer(event) == TickOutcome::Settled {
            self.timer.cancel();
        }
    }

    /// Handle a UI tick.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }

    /// Handle a terminal resize, switching layout at the breakpoint.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        let mode = LayoutMode::for_width(width, self.narrow_breakpoint);
        if mode == self.layout_mode {
            return;
        }
        info!(?mode, width, "layout mode changed");
        self.layout_mode = mode;
        if mode == LayoutMode::Narrow {
            if self.assistant_open() {
                self.store.set_expanded_panel(ExpandedPanel::None);
            }
            self.focus = FocusedPane::Thread;
        } else if !self.visible_panes().contains(&self.focus) {
            self.focus = FocusedPane::Thread;
        }
        self.process_store_events();
    }

    /// Drain store notifications and resync dependent state.
    pub fn process_store_events(&mut self) {
        while let Ok(event) = self.store_rx.try_recv() {
            match event {
                StoreEvent::DraftChanged(draft) => {
                    if self.composer.content() != draft {
                        self.composer.set_content(draft);
                    }
                }
                StoreEvent::PanelChanged(panel) => self.sync_session(panel),
                StoreEvent::SelectionChanged(Some(id)) => {
                    if let Some(pos) = self.store.conversations().iter().position(|c| c.id == id)
                    {
                        self.list_index = pos;
                    }
                }
                StoreEvent::SelectionChanged(None) => debug!("selection cleared"),
                StoreEvent::MessageAppended { conversation_id, .. } => {
                    debug!(conversation_id = %conversation_id, "message appended");
                }
                StoreEvent::AutomationToggled(on) => {
                    self.set_notification(if on {
                        "Automation on"
                    } else {
                        "Automation off"
                    });
                }
                StoreEvent::MessagesSeen(_) => {}
            }
        }
    }

    /// Mount or unmount the assistant session to match the panel flag.
    fn sync_session(&mut self, panel: ExpandedPanel) {
        let open = panel == ExpandedPanel::Assistant;
        if open && self.session.is_none() {
            self.session = Some(AssistantSession::new(self.rules.clone(), self.timing));
            self.assistant_tab = AssistantTab::Copilot;
            info!("assistant panel mounted");
        } else if !open {
            if let Some(mut session) = self.session.take() {
                self.timer.cancel();
                session.unmount();
                self.assistant_input.clear();
                if self.focus == FocusedPane::Assistant {
                    self.focus = FocusedPane::Thread;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, type_text};
    use inbox_engine::reply::{GENERIC_INTRO, REFUND_REPLY};
    use inbox_engine::ReplyPhase;

    #[test]
    fn test_initial_state() {
        let (app, _rx) = create_test_app();
        assert_eq!(app.focus, FocusedPane::Thread);
        assert_eq!(app.store.selected_id(), Some("c1"));
        assert!(app.session.is_none());
        assert!(app.is_typing());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_typing_mirrors_draft_and_enter_sends() {
        let (mut app, _rx) = create_test_app();
        type_text(&mut app, "On it");
        assert_eq!(app.store.composer_draft(), "On it");

        let before = app.store.selected_conversation().unwrap().messages.len();
        app.handle_action(Action::Submit);

        let convo = app.store.selected_conversation().unwrap();
        assert_eq!(convo.messages.len(), before + 1);
        assert_eq!(convo.last_message().unwrap().text, "On it");
        assert!(app.composer.is_empty());
        assert_eq!(app.store.composer_draft(), "");
    }

    #[test]
    fn test_newline_then_send_keeps_both_lines() {
        let (mut app, _rx) = create_test_app();
        type_text(&mut app, "a");
        app.handle_action(Action::Newline);
        type_text(&mut app, "b");
        app.handle_action(Action::Submit);
        let last = app.store.selected_conversation().unwrap().last_message().unwrap();
        assert_eq!(last.text, "a\nb");
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let (mut app, _rx) = create_test_app();
        type_text(&mut app, "   ");
        let before = app.store.selected_conversation().unwrap().messages.len();
        app.handle_action(Action::Submit);
        assert_eq!(app.store.selected_conversation().unwrap().messages.len(), before);
        assert_eq!(app.composer.content(), "   ");
    }

    #[test]
    fn test_external_draft_change_resyncs_composer() {
        let (mut app, _rx) = create_test_app();
        app.store.add_to_composer("from elsewhere");
        app.process_store_events();
        assert_eq!(app.composer.content(), "from elsewhere");
        assert_eq!(app.composer.cursor(), "from elsewhere".len());
    }

    #[test]
    fn test_toggle_assistant_mounts_and_unmounts_session() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::ToggleAssistant);
        assert!(app.assistant_open());
        assert!(app.session.is_some());
        assert_eq!(app.focus, FocusedPane::Assistant);

        app.handle_action(Action::ToggleAssistant);
        assert!(!app.assistant_open());
        assert!(app.session.is_none());
        assert_eq!(app.focus, FocusedPane::Thread);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_mid_reveal_keeps_streaming() {
        let (mut app, mut rx) = create_test_app();
        app.handle_action(Action::ToggleAssistant);
        type_text(&mut app, "refund?");
        app.handle_action(Action::Submit);

        for _ in 0..2 {
            let event = rx.recv().await.unwrap();
            app.handle_timer_event(event);
        }
        app.handle_action(Action::Submit);
        assert_eq!(app.session.as_ref().unwrap().phase(), ReplyPhase::Revealing);

        while let Some(event) = rx.recv().await {
            app.handle_timer_event(event);
            if app.session.as_ref().unwrap().phase() == ReplyPhase::Settled {
                break;
            }
        }
        let session = app.session.as_ref().unwrap();
        assert!(session.entries().iter().all(|e| !e.is_revealing));
        assert_eq!(session.entries().last().unwrap().text, REFUND_REPLY);
        // the blank query added no entry
        assert_eq!(session.entries().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refund_query_reveals_and_adds_to_composer() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::ToggleAssistant);
        type_text(&mut app, "Can I get a refund?");
        app.handle_action(Action::Submit);

        let generation = {
            let session = app.session.as_ref().unwrap();
            assert_eq!(session.phase(), ReplyPhase::Revealing);
            session.generation()
        };
        assert!(app.assistant_input.is_empty());

        app.handle_timer_event(TimerEvent::Tick(generation));
        app.handle_timer_event(TimerEvent::Tick(generation));
        let placeholder = app.session.as_ref().unwrap().entries().last().unwrap().clone();
        assert!(placeholder.is_revealing);
        assert_eq!(placeholder.text, "To");

        for _ in 2..REFUND_REPLY.chars().count() {
            app.handle_timer_event(TimerEvent::Tick(generation));
        }
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.phase(), ReplyPhase::Settled);
        assert_eq!(session.entries().last().unwrap().text, REFUND_REPLY);

        app.handle_action(Action::AddToComposer);
        assert_eq!(app.store.composer_draft(), REFUND_REPLY);
        assert_eq!(app.composer.content(), REFUND_REPLY);
        assert_eq!(app.focus, FocusedPane::Thread);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generic_query_settles_after_delay_event() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::ToggleAssistant);
        app.ask("hello there");
        let generation = app.session.as_ref().unwrap().generation();
        app.handle_timer_event(TimerEvent::Elapsed(generation));
        let last = app.session.as_ref().unwrap().entries().last().unwrap().clone();
        assert_eq!(last.text, GENERIC_INTRO);
        assert!(last.suggestion_text.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_closing_panel_mid_reveal_discards_session() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::ToggleAssistant);
        app.ask("refund");
        let generation = app.session.as_ref().unwrap().generation();
        app.handle_timer_event(TimerEvent::Tick(generation));

        app.handle_action(Action::ToggleAssistant);
        assert!(app.session.is_none());
        // late ticks are harmless
        app.handle_timer_event(TimerEvent::Tick(generation));

        // reopening starts a fresh session
        app.handle_action(Action::ToggleAssistant);
        assert!(app.session.as_ref().unwrap().entries().is_empty());
    }

    #[test]
    fn test_add_to_composer_without_suggestion() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::ToggleAssistant);
        app.handle_action(Action::AddToComposer);
        assert_eq!(app.notification.as_deref(), Some("No suggestion yet"));
        assert_eq!(app.store.composer_draft(), "");
    }

    #[test]
    fn test_narrow_resize_closes_assistant() {
        let (mut app, _rx) = create_test_app();
        app.handle_resize(140, 40);
        app.handle_action(Action::ToggleAssistant);
        assert!(app.session.is_some());

        app.handle_resize(80, 40);
        assert_eq!(app.layout_mode, LayoutMode::Narrow);
        assert!(!app.assistant_open());
        assert!(app.session.is_none());
        assert_eq!(app.focus, FocusedPane::Thread);
    }

    #[test]
    fn test_focus_cycles_visible_panes() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::FocusNext);
        assert_eq!(app.focus, FocusedPane::Sidebar);
        app.handle_action(Action::FocusNext);
        assert_eq!(app.focus, FocusedPane::Thread);

        app.handle_action(Action::ToggleSidebar);
        app.handle_action(Action::FocusNext);
        assert_eq!(app.focus, FocusedPane::Thread);
    }

    #[test]
    fn test_sidebar_selects_conversation() {
        let (mut app, _rx) = create_test_app();
        assert_eq!(app.store.unread_count(), 1);
        app.focus = FocusedPane::Sidebar;
        app.handle_action(Action::Down);
        app.handle_action(Action::Submit);

        assert_eq!(app.store.selected_id(), Some("c2"));
        assert_eq!(app.store.unread_count(), 0);
        assert_eq!(app.focus, FocusedPane::Thread);
    }

    #[test]
    fn test_sidebar_cursor_clamped() {
        let (mut app, _rx) = create_test_app();
        app.focus = FocusedPane::Sidebar;
        for _ in 0..20 {
            app.handle_action(Action::Down);
        }
        assert_eq!(app.list_index, app.store.conversations().len() - 1);
        app.handle_action(Action::Up);
        assert_eq!(app.list_index, app.store.conversations().len() - 2);
    }

    #[test]
    fn test_mentions_enter_selects_and_marks_seen() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::ToggleMentions);
        assert_eq!(app.focus, FocusedPane::Mentions);

        app.handle_action(Action::Down);
        app.handle_action(Action::Submit);
        assert_eq!(app.store.selected_id(), Some("c2"));
        assert!(!app.store.conversation("c2").unwrap().has_unseen());
        assert!(app.show_mentions);
    }

    #[test]
    fn test_escape_closes_overlays_then_quits() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::ToggleMentions);
        app.handle_action(Action::ToggleAssistant);

        app.handle_action(Action::Back);
        assert!(!app.show_mentions);
        assert!(!app.should_quit);

        app.handle_action(Action::Back);
        assert!(!app.assistant_open());
        assert!(!app.should_quit);

        app.handle_action(Action::Back);
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::Help);
        assert!(app.show_help);
        assert!(!app.is_typing());

        app.handle_action(Action::Down);
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_details_sections_open_one_at_a_time() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::ToggleAssistant);
        app.handle_action(Action::SwitchTab);
        assert_eq!(app.assistant_tab, AssistantTab::Details);
        assert!(!app.is_typing());

        app.handle_action(Action::Down);
        app.handle_action(Action::Submit);
        assert_eq!(app.open_section, Some(1));

        app.handle_action(Action::Up);
        app.handle_action(Action::Submit);
        assert_eq!(app.open_section, Some(0));

        app.handle_action(Action::Submit);
        assert_eq!(app.open_section, None);
    }

    #[test]
    fn test_use_suggested_query_fills_input() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::ToggleAssistant);
        app.handle_action(Action::UseSuggestedQuery);
        assert_eq!(app.assistant_input.content(), SUGGESTED_QUERIES[0]);
    }

    #[test]
    fn test_close_conversation() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::CloseConversation);
        assert!(app.store.selected_conversation().is_none());

        // sending with nothing selected keeps the draft
        type_text(&mut app, "hi");
        app.handle_action(Action::Submit);
        assert_eq!(app.store.composer_draft(), "hi");
    }

    #[test]
    fn test_toggle_automation_notifies() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::ToggleAutomation);
        assert!(app.store.automation_on());
        assert_eq!(app.notification.as_deref(), Some("Automation on"));

        for _ in 0..NOTIFICATION_TICKS {
            app.on_tick();
        }
        assert!(app.notification.is_none());
    }
}
