//! Simulated assistant replies.
//!
//! A query is classified against an ordered rule list (first match wins) and
//! answered with a canned template. Streaming templates are revealed one
//! character per tick into a placeholder entry; the placeholder is replaced by
//! a settled entry once the whole reply is visible. Other templates arrive in
//! one piece after a fixed delay.
//!
//! The session never schedules anything itself. [`AssistantSession::ask`]
//! returns a [`Schedule`] for the caller's timer (see [`crate::timer`]), and
//! every tick carries the generation it was scheduled for. Ticks from a
//! superseded generation, or arriving after [`AssistantSession::unmount`], are
//! ignored.

use std::time::Duration;

use regex::{Regex, RegexBuilder};
use tracing::{debug, info};

use crate::store::ConversationStore;
use crate::timer::TimerEvent;

/// Canned answer for refund questions.
pub const REFUND_REPLY: &str = "To process your refund, please provide your order ID and proof \
of purchase. We can only refund orders within the last 60 days. Once verified, I'll send you a \
returns QR code for shipping.";

/// Lead-in text of the generic suggestion.
pub const GENERIC_INTRO: &str = "Here's a suggested response to your question:";

/// Generic suggestion offered when no rule matches.
pub const GENERIC_SUGGESTION: &str = "Thank you for your inquiry. I'll be happy to help you with \
that. Let me look into this for you and get back to you shortly.";

/// How a template reaches the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Revealed character by character on a repeating tick.
    Stream,
    /// Appended whole after a single delay.
    Delayed,
}

/// A canned reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTemplate {
    /// Text shown in the assistant entry.
    pub text: String,
    /// Text copied into the composer by "add to composer".
    pub suggestion: String,
    pub delivery: Delivery,
}

impl ReplyTemplate {
    /// A streamed template whose text is also the suggestion.
    pub fn streamed(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            suggestion: text.clone(),
            text,
            delivery: Delivery::Stream,
        }
    }

    /// A delayed template with separate lead-in and suggestion.
    pub fn delayed(text: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggestion: suggestion.into(),
            delivery: Delivery::Delayed,
        }
    }
}

/// A classification rule: a predicate paired with a template.
#[derive(Debug, Clone)]
pub struct ReplyRule {
    name: String,
    pattern: Regex,
    template: ReplyTemplate,
}

impl ReplyRule {
    /// Build a rule from a regular expression.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        template: ReplyTemplate,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            template,
        })
    }

    /// Build a rule matching `keyword` anywhere in the query, ignoring case.
    pub fn keyword(keyword: &str, template: ReplyTemplate) -> Self {
        let pattern = RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
            .expect("escaped keyword is a valid pattern");
        Self {
            name: keyword.to_string(),
            pattern,
            template,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, query: &str) -> bool {
        self.pattern.is_match(query)
    }
}

/// Ordered rule list with a fallback template.
#[derive(Debug, Clone)]
pub struct ReplyRules {
    rules: Vec<ReplyRule>,
    fallback: ReplyTemplate,
}

impl Default for ReplyRules {
    fn default() -> Self {
        Self::new(ReplyTemplate::delayed(GENERIC_INTRO, GENERIC_SUGGESTION))
            .with_rule(ReplyRule::keyword("refund", ReplyTemplate::streamed(REFUND_REPLY)))
    }
}

impl ReplyRules {
    /// Empty rule list; every query gets `fallback`.
    pub fn new(fallback: ReplyTemplate) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Append a rule, evaluated after the existing ones.
    #[must_use]
    pub fn with_rule(mut self, rule: ReplyRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Pick the template for a query. First match wins.
    pub fn classify(&self, query: &str) -> &ReplyTemplate {
        self.rules
            .iter()
            .find(|r| r.matches(query))
            .map_or(&self.fallback, |r| {
                debug!(rule = r.name(), "query matched rule");
                &r.template
            })
    }
}

/// Progress of a streaming reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    full_text: String,
    /// Characters shown so far.
    revealed_count: usize,
    total: usize,
    active: bool,
}

impl RevealState {
    pub fn new(full_text: impl Into<String>) -> Self {
        let full_text = full_text.into();
        let total = full_text.chars().count();
        Self {
            full_text,
            revealed_count: 0,
            total,
            active: true,
        }
    }

    /// The visible prefix. Never splits a character.
    pub fn revealed(&self) -> &str {
        let end = self
            .full_text
            .char_indices()
            .nth(self.revealed_count)
            .map_or(self.full_text.len(), |(i, _)| i);
        &self.full_text[..end]
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_complete(&self) -> bool {
        self.revealed_count >= self.total
    }

    /// Reveal one more character. Returns `false` if inactive or complete.
    fn advance(&mut self) -> bool {
        if !self.active || self.is_complete() {
            return false;
        }
        self.revealed_count += 1;
        true
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// One entry in the assistant panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantEntry {
    pub id: u64,
    pub text: String,
    pub is_assistant: bool,
    /// Present on settled assistant entries; feeds "add to composer".
    pub suggestion_text: Option<String>,
    /// True only for the placeholder of an in-flight reveal.
    pub is_revealing: bool,
}

/// Where the session is in answering the latest query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyPhase {
    #[default]
    Idle,
    /// Transient while a query is being matched against the rules.
    Classifying,
    /// Streaming into the placeholder entry.
    Revealing,
    /// Waiting out the delay of a non-streaming reply.
    Waiting,
    /// Reply delivered.
    Settled,
}

/// Work the caller must schedule after [`AssistantSession::ask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Nothing to schedule.
    None,
    /// Repeating tick until the reveal settles.
    Ticks { generation: u64, interval: Duration },
    /// A single delay.
    Delay { generation: u64, delay: Duration },
}

/// Result of feeding a timer event to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale, cancelled or unmounted; nothing changed.
    Ignored,
    /// More characters remain.
    Continue,
    /// The reply settled; the timer can stop.
    Settled,
}

/// Timing of simulated replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    pub reveal_interval: Duration,
    pub suggestion_delay: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            reveal_interval: Duration::from_millis(18),
            suggestion_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone)]
struct PendingReply {
    template: ReplyTemplate,
    placeholder_id: Option<u64>,
}

/// Ephemeral assistant conversation owned by a mounted assistant panel.
#[derive(Debug)]
pub struct AssistantSession {
    rules: ReplyRules,
    timing: SessionTiming,
    entries: Vec<AssistantEntry>,
    reveal: Option<RevealState>,
    pending: Option<PendingReply>,
    generation: u64,
    next_id: u64,
    phase: ReplyPhase,
    mounted: bool,
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self::new(ReplyRules::default(), SessionTiming::default())
    }
}

impl AssistantSession {
    /// Mount a new, empty session.
    pub fn new(rules: ReplyRules, timing: SessionTiming) -> Self {
        Self {
            rules,
            timing,
            entries: Vec::new(),
            reveal: None,
            pending: None,
            generation: 0,
            next_id: 0,
            phase: ReplyPhase::Idle,
            mounted: true,
        }
    }

    pub fn entries(&self) -> &[AssistantEntry] {
        &self.entries
    }

    pub fn phase(&self) -> ReplyPhase {
        self.phase
    }

    pub fn reveal(&self) -> Option<&RevealState> {
        self.reveal.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether a reveal or delay is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    fn push(
        &mut self,
        text: String,
        is_assistant: bool,
        suggestion: Option<String>,
        revealing: bool,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(AssistantEntry {
            id,
            text,
            is_assistant,
            suggestion_text: suggestion,
            is_revealing: revealing,
        });
        id
    }

    /// Drop any outstanding reply, including its placeholder.
    fn cancel_pending(&mut self) {
        if let Some(reveal) = &mut self.reveal {
            reveal.deactivate();
        }
        self.reveal = None;
        if let Some(pending) = self.pending.take() {
            if let Some(placeholder) = pending.placeholder_id {
                self.entries.retain(|e| e.id != placeholder);
            }
            debug!(generation = self.generation, "pending reply superseded");
        }
    }

    /// Submit a query. Returns the work the caller must schedule.
    ///
    /// Blank queries are ignored. A new query supersedes any reply still in
    /// flight.
    pub fn ask(&mut self, query: &str) -> Schedule {
        if !self.mounted {
            debug!("ask ignored: session unmounted");
            return Schedule::None;
        }
        if query.trim().is_empty() {
            return Schedule::None;
        }

        self.cancel_pending();
        self.push(query.to_string(), false, None, false);

        self.phase = ReplyPhase::Classifying;
        let template = self.rules.classify(query).clone();
        self.generation += 1;
        let generation = self.generation;

        match template.delivery {
            Delivery::Stream => {
                let placeholder = self.push(String::new(), true, None, true);
                self.reveal = Some(RevealState::new(template.text.clone()));
                self.pending = Some(PendingReply {
                    template,
                    placeholder_id: Some(placeholder),
                });
                self.phase = ReplyPhase::Revealing;
                info!(generation, "streaming reply started");
                Schedule::Ticks {
                    generation,
                    interval: self.timing.reveal_interval,
                }
            }
            Delivery::Delayed => {
                self.pending = Some(PendingReply {
                    template,
                    placeholder_id: None,
                });
                self.phase = ReplyPhase::Waiting;
                info!(generation, "delayed reply scheduled");
                Schedule::Delay {
                    generation,
                    delay: self.timing.suggestion_delay,
                }
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.mounted && generation == self.generation && self.pending.is_some()
    }

    /// Apply one reveal tick.
    pub fn on_tick(&mut self, generation: u64) -> TickOutcome {
        if !self.is_current(generation) {
            return TickOutcome::Ignored;
        }
        let Some(reveal) = self.reveal.as_mut() else {
            return TickOutcome::Ignored;
        };
        if !reveal.advance() && !reveal.is_complete() {
            return TickOutcome::Ignored;
        }

        let shown = reveal.revealed().to_string();
        let complete = reveal.is_complete();
        let placeholder = self.pending.as_ref().and_then(|p| p.placeholder_id);
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| Some(e.id) == placeholder)
        {
            entry.text = shown;
        }

        if complete {
            self.settle();
            TickOutcome::Settled
        } else {
            TickOutcome::Continue
        }
    }

    /// Apply the single delay of a non-streaming reply.
    pub fn on_delay_elapsed(&mut self, generation: u64) -> TickOutcome {
        if !self.is_current(generation) || self.reveal.is_some() {
            return TickOutcome::Ignored;
        }
        self.settle();
        TickOutcome::Settled
    }

    /// Route a timer event to the matching handler.
    pub fn handle_timer(&mut self, event: TimerEvent) -> TickOutcome {
        match event {
            TimerEvent::Tick(generation) => self.on_tick(generation),
            TimerEvent::Elapsed(generation) => self.on_delay_elapsed(generation),
        }
    }

    fn settle(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if let Some(placeholder) = pending.placeholder_id {
            self.entries.retain(|e| e.id != placeholder);
        }
        self.reveal = None;
        let template = pending.template;
        self.push(template.text, true, Some(template.suggestion), false);
        self.phase = ReplyPhase::Settled;
        info!(generation = self.generation, "reply settled");
    }

    /// Suggestion text of a settled assistant entry.
    pub fn suggestion(&self, entry_id: u64) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == entry_id && e.is_assistant && !e.is_revealing)
            .and_then(|e| e.suggestion_text.as_deref())
    }

    /// Id of the most recent settled entry carrying a suggestion.
    pub fn latest_suggestion_id(&self) -> Option<u64> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.suggestion_text.is_some() && !e.is_revealing)
            .map(|e| e.id)
    }

    /// Copy a settled entry's suggestion into the composer.
    pub fn add_to_composer(&self, entry_id: u64, store: &mut ConversationStore) -> bool {
        match self.suggestion(entry_id) {
            Some(text) => store.add_to_composer(text),
            None => false,
        }
    }

    /// Tear the session down. Later ticks are ignored.
    pub fn unmount(&mut self) {
        if let Some(reveal) = &mut self.reveal {
            reveal.deactivate();
        }
        self.pending = None;
        self.mounted = false;
        self.generation += 1;
        info!("assistant session unmounted");
    }
}
