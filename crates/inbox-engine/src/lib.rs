//! inbox-engine: Conversation store and assistant reply simulation
//!
//! This crate holds everything the support inbox needs apart from rendering:
//! - Data model and seed conversations
//! - The conversation store with change subscriptions
//! - The streaming reply simulator and its tokio timer driver
//! - Configuration

pub mod config;
pub mod model;
pub mod reply;
pub mod seed;
pub mod store;
pub mod timer;

// Re-export commonly used types
pub use config::{ConfigError, IconStyle, InboxConfig, DEFAULT_CONFIG_PATH};
pub use model::{Conversation, ExpandedPanel, Message, Presence, Sender, Timestamp, User};
pub use reply::{
    AssistantEntry, AssistantSession, Delivery, ReplyPhase, ReplyRule, ReplyRules, ReplyTemplate,
    RevealState, Schedule, SessionTiming, TickOutcome,
};
pub use seed::SUGGESTED_QUERIES;
pub use store::{ConversationStore, Mention, StoreError, StoreEvent, SubscriptionId};
pub use timer::{RevealTimer, TimerEvent};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
