//! Conversation store.
//!
//! Holds the conversation list, the active selection, the composer draft and
//! the expanded-panel flag. The store is an explicit object constructed once
//! and handed to every consumer; views observe it through
//! [`ConversationStore::subscribe`].

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{Conversation, ExpandedPanel, Message, Timestamp};
use crate::seed;

/// Errors returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The selected conversation changed.
    SelectionChanged(Option<String>),
    /// The composer draft was replaced.
    DraftChanged(String),
    /// A message was appended to a conversation.
    MessageAppended {
        conversation_id: String,
        message_id: String,
    },
    /// The expanded panel changed.
    PanelChanged(ExpandedPanel),
    /// Automation was switched on or off.
    AutomationToggled(bool),
    /// Every message of a conversation was marked seen.
    MessagesSeen(String),
}

/// Handle returned by [`ConversationStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent) + Send>;

/// Mentions-panel summary of a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub conversation_id: String,
    pub name: String,
    /// Last message text, or a fallback when the conversation is empty.
    pub preview: String,
    pub timestamp: Option<Timestamp>,
    pub unseen: bool,
}

/// The conversation store.
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    selected: Option<String>,
    draft: String,
    expanded_panel: ExpandedPanel,
    automation_on: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationStore")
            .field("conversations", &self.conversations.len())
            .field("selected", &self.selected)
            .field("draft", &self.draft)
            .field("expanded_panel", &self.expanded_panel)
            .field("automation_on", &self.automation_on)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::with_seed()
    }
}

impl ConversationStore {
    /// Create a store over the given conversations, selecting the first one.
    ///
    /// Conversations with a duplicate id are dropped.
    pub fn new(conversations: Vec<Conversation>) -> Self {
        let mut seen = HashSet::new();
        let conversations: Vec<Conversation> = conversations
            .into_iter()
            .filter(|c| {
                let fresh = seen.insert(c.id.clone());
                if !fresh {
                    warn!(id = %c.id, "dropping conversation with duplicate id");
                }
                fresh
            })
            .collect();
        let selected = conversations.first().map(|c| c.id.clone());

        Self {
            conversations,
            selected,
            draft: String::new(),
            expanded_panel: ExpandedPanel::None,
            automation_on: false,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a store over the static seed data.
    pub fn with_seed() -> Self {
        Self::new(seed::conversations())
    }

    // ------------------------------------------------------------------
    // Subscription
    // ------------------------------------------------------------------

    /// Register a listener called after every successful mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: &StoreEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_conversation(&self) -> Option<&Conversation> {
        self.selected.as_deref().and_then(|id| self.conversation(id))
    }

    pub fn composer_draft(&self) -> &str {
        &self.draft
    }

    pub fn expanded_panel(&self) -> ExpandedPanel {
        self.expanded_panel
    }

    pub fn automation_on(&self) -> bool {
        self.automation_on
    }

    /// Number of conversations flagged unread.
    pub fn unread_count(&self) -> usize {
        self.conversations.iter().filter(|c| c.unread).count()
    }

    /// Summaries for the mentions panel, in conversation order.
    pub fn mentions(&self) -> Vec<Mention> {
        self.conversations
            .iter()
            .map(|c| {
                let last = c.last_message();
                Mention {
                    conversation_id: c.id.clone(),
                    name: c.user.name.clone(),
                    preview: last.map_or_else(|| "No messages yet".to_string(), |m| m.text.clone()),
                    timestamp: last.map(|m| m.timestamp.clone()),
                    unseen: c.has_unseen(),
                }
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Select a conversation by id.
    ///
    /// Unknown ids are rejected and the current selection is kept.
    /// Selecting a conversation clears its unread flag.
    pub fn select_conversation(&mut self, id: &str) -> Result<(), StoreError> {
        let Some(convo) = self.conversations.iter_mut().find(|c| c.id == id) else {
            warn!(id, "select rejected: unknown conversation");
            return Err(StoreError::ConversationNotFound(id.to_string()));
        };
        convo.unread = false;
        self.selected = Some(id.to_string());
        debug!(id, "conversation selected");
        self.notify(&StoreEvent::SelectionChanged(self.selected.clone()));
        Ok(())
    }

    /// Clear the selection so no conversation is active.
    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            debug!("selection cleared");
            self.notify(&StoreEvent::SelectionChanged(None));
        }
    }

    /// Replace the composer draft verbatim.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.notify(&StoreEvent::DraftChanged(self.draft.clone()));
    }

    /// Send a message to the selected conversation.
    ///
    /// Uses `text` when given, otherwise the composer draft. Blank text or a
    /// missing selection makes this a no-op that leaves the draft untouched.
    /// Returns the id of the appended message.
    pub fn send_message(&mut self, text: Option<&str>) -> Option<String> {
        let resolved = text.map_or_else(|| self.draft.clone(), ToString::to_string);
        if resolved.trim().is_empty() {
            debug!("send ignored: blank message");
            return None;
        }

        let selected = self.selected.clone()?;
        let Some(convo) = self.conversations.iter_mut().find(|c| c.id == selected) else {
            debug!(id = %selected, "send ignored: selection vanished");
            return None;
        };

        let message = Message::outgoing(resolved);
        let message_id = message.id.clone();
        convo.messages.push(message);
        self.draft.clear();
        debug!(conversation = %selected, message = %message_id, "message sent");

        self.notify(&StoreEvent::MessageAppended {
            conversation_id: selected,
            message_id: message_id.clone(),
        });
        self.notify(&StoreEvent::DraftChanged(String::new()));
        Some(message_id)
    }

    /// Replace the expanded-panel flag.
    pub fn set_expanded_panel(&mut self, panel: ExpandedPanel) {
        self.expanded_panel = panel;
        self.notify(&StoreEvent::PanelChanged(panel));
    }

    /// Flip the assistant panel open or closed.
    pub fn toggle_assistant(&mut self) {
        let next = if self.expanded_panel == ExpandedPanel::Assistant {
            ExpandedPanel::None
        } else {
            ExpandedPanel::Assistant
        };
        self.set_expanded_panel(next);
    }

    /// Flip automation on or off.
    pub fn toggle_automation(&mut self) {
        self.automation_on = !self.automation_on;
        self.notify(&StoreEvent::AutomationToggled(self.automation_on));
    }

    /// Mark every message of a conversation as seen.
    pub fn mark_seen(&mut self, id: &str) -> Result<(), StoreError> {
        let Some(convo) = self.conversations.iter_mut().find(|c| c.id == id) else {
            return Err(StoreError::ConversationNotFound(id.to_string()));
        };
        for message in &mut convo.messages {
            message.seen = true;
        }
        self.notify(&StoreEvent::MessagesSeen(id.to_string()));
        Ok(())
    }

    /// Copy an assistant suggestion into the composer, overwriting the draft.
    ///
    /// Dropped silently when no conversation is active.
    pub fn add_to_composer(&mut self, text: &str) -> bool {
        if self.selected_conversation().is_none() {
            debug!("add to composer ignored: no active conversation");
            return false;
        }
        self.set_draft(text);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sender;
    use std::sync::{Arc, Mutex};

    fn recorded(store: &mut ConversationStore) -> Arc<Mutex<Vec<StoreEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        store.subscribe(move |e| sink.lock().unwrap().push(e.clone()));
        events
    }

    #[test]
    fn test_seed_store_selects_first() {
        let store = ConversationStore::with_seed();
        assert_eq!(store.selected_id(), Some("c1"));
        assert_eq!(store.composer_draft(), "");
        assert_eq!(store.expanded_panel(), ExpandedPanel::None);
    }

    #[test]
    fn test_blank_send_is_noop() {
        for blank in ["", " ", "\t", "\n  \n"] {
            let mut store = ConversationStore::with_seed();
            let before = store.selected_conversation().unwrap().messages.len();

            store.set_draft(blank);
            assert!(store.send_message(None).is_none());

            assert_eq!(store.selected_conversation().unwrap().messages.len(), before);
            assert_eq!(store.composer_draft(), blank);
        }
    }

    #[test]
    fn test_send_explicit_text_appends_and_clears_draft() {
        let mut store = ConversationStore::with_seed();
        store.set_draft("unrelated draft");
        let before = store.selected_conversation().unwrap().messages.len();

        let id = store.send_message(Some("Refund issued")).unwrap();

        let convo = store.selected_conversation().unwrap();
        assert_eq!(convo.messages.len(), before + 1);
        let last = convo.last_message().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.sender, Sender::Admin);
        assert_eq!(last.text, "Refund issued");
        assert!(!last.seen);
        assert_eq!(store.composer_draft(), "");
    }

    #[test]
    fn test_send_uses_draft_when_no_text() {
        let mut store = ConversationStore::with_seed();
        store.set_draft("  keep my spaces  ");
        store.send_message(None).unwrap();
        assert_eq!(
            store.selected_conversation().unwrap().last_message().unwrap().text,
            "  keep my spaces  "
        );
        assert_eq!(store.composer_draft(), "");
    }

    #[test]
    fn test_send_without_selection_is_noop() {
        let mut store = ConversationStore::with_seed();
        store.clear_selection();
        store.set_draft("hello");
        assert!(store.send_message(None).is_none());
        assert_eq!(store.composer_draft(), "hello");
    }

    #[test]
    fn test_select_retargets_send() {
        let mut store = ConversationStore::with_seed();
        store.select_conversation("c3").unwrap();
        store.send_message(Some("We have 20% off this week")).unwrap();

        let c3 = store.conversation("c3").unwrap();
        assert_eq!(c3.last_message().unwrap().text, "We have 20% off this week");
        let c1 = store.conversation("c1").unwrap();
        assert_eq!(c1.messages.len(), 2);
    }

    #[test]
    fn test_select_unknown_rejected() {
        let mut store = ConversationStore::with_seed();
        store.select_conversation("c2").unwrap();

        let err = store.select_conversation("nope").unwrap_err();
        assert_eq!(err, StoreError::ConversationNotFound("nope".into()));
        assert_eq!(store.selected_id(), Some("c2"));
    }

    #[test]
    fn test_select_clears_unread() {
        let mut store = ConversationStore::with_seed();
        assert_eq!(store.unread_count(), 1);
        store.select_conversation("c2").unwrap();
        assert!(!store.conversation("c2").unwrap().unread);
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn test_set_draft_verbatim() {
        let mut store = ConversationStore::with_seed();
        let long = "x".repeat(10_000);
        store.set_draft(long.clone());
        assert_eq!(store.composer_draft(), long);
        store.set_draft("  padded\n");
        assert_eq!(store.composer_draft(), "  padded\n");
    }

    #[test]
    fn test_add_to_composer_overwrites() {
        let mut store = ConversationStore::with_seed();
        store.set_draft("old draft");
        assert!(store.add_to_composer("Suggested reply"));
        assert_eq!(store.composer_draft(), "Suggested reply");
    }

    #[test]
    fn test_add_to_composer_without_selection_dropped() {
        let mut store = ConversationStore::with_seed();
        store.clear_selection();
        store.set_draft("old draft");
        assert!(!store.add_to_composer("Suggested reply"));
        assert_eq!(store.composer_draft(), "old draft");
    }

    #[test]
    fn test_panel_and_toggles() {
        let mut store = ConversationStore::with_seed();
        store.set_expanded_panel(ExpandedPanel::Chat);
        assert_eq!(store.expanded_panel(), ExpandedPanel::Chat);

        store.toggle_assistant();
        assert_eq!(store.expanded_panel(), ExpandedPanel::Assistant);
        store.toggle_assistant();
        assert_eq!(store.expanded_panel(), ExpandedPanel::None);

        store.toggle_automation();
        assert!(store.automation_on());
    }

    #[test]
    fn test_mark_seen() {
        let mut store = ConversationStore::with_seed();
        assert!(store.conversation("c2").unwrap().has_unseen());
        store.mark_seen("c2").unwrap();
        assert!(!store.conversation("c2").unwrap().has_unseen());
        assert!(store.mark_seen("missing").is_err());
    }

    #[test]
    fn test_mentions_summary() {
        let store = ConversationStore::with_seed();
        let mentions = store.mentions();
        assert_eq!(mentions.len(), 5);
        assert_eq!(mentions[0].name, "Luis");
        assert_eq!(mentions[0].preview, "Let me just look into this for you, Luis.");
        // c1 still has the unseen user message
        assert!(mentions[0].unseen);
    }

    #[test]
    fn test_mentions_empty_conversation() {
        let mut convos = seed::conversations();
        convos[0].messages.clear();
        let store = ConversationStore::new(convos);
        let mention = &store.mentions()[0];
        assert_eq!(mention.preview, "No messages yet");
        assert!(mention.timestamp.is_none());
        assert!(!mention.unseen);
    }

    #[test]
    fn test_duplicate_ids_dropped() {
        let mut convos = seed::conversations();
        convos.push(convos[0].clone());
        let store = ConversationStore::new(convos);
        assert_eq!(store.conversations().len(), 5);
    }

    #[test]
    fn test_listener_receives_events() {
        let mut store = ConversationStore::with_seed();
        let events = recorded(&mut store);

        store.set_draft("hi");
        let id = store.send_message(None).unwrap();
        store.set_expanded_panel(ExpandedPanel::Assistant);

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                StoreEvent::DraftChanged("hi".into()),
                StoreEvent::MessageAppended {
                    conversation_id: "c1".into(),
                    message_id: id,
                },
                StoreEvent::DraftChanged(String::new()),
                StoreEvent::PanelChanged(ExpandedPanel::Assistant),
            ]
        );
    }

    #[test]
    fn test_noops_do_not_notify() {
        let mut store = ConversationStore::with_seed();
        let events = recorded(&mut store);

        store.send_message(Some("   "));
        let _ = store.select_conversation("missing");
        store.clear_selection();
        events.lock().unwrap().clear();
        store.clear_selection();
        store.send_message(Some("nobody selected"));
        store.add_to_composer("dropped");

        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut store = ConversationStore::with_seed();
        let events = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&events);
        let id = store.subscribe(move |_| *sink.lock().unwrap() += 1);

        store.set_draft("a");
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_draft("b");

        assert_eq!(*events.lock().unwrap(), 1);
    }

    #[test]
    fn test_send_observes_draft_at_invocation() {
        let mut store = ConversationStore::with_seed();
        store.set_draft("first");
        store.send_message(None).unwrap();
        store.set_draft("second");
        let convo = store.selected_conversation().unwrap();
        assert_eq!(convo.last_message().unwrap().text, "first");
    }
}
