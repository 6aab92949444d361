//! Core data types for the support inbox.
//!
//! Conversations own their messages outright; the store hands out shared
//! references only, so every mutation goes through [`crate::store`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Presence of an external user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    #[default]
    Offline,
    Away,
}

/// An external user on the other end of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub company: String,
    /// Reference to an avatar image; the terminal renders an initial instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,
    #[serde(default)]
    pub status: Presence,
}

impl User {
    /// First character of the name, used in place of an avatar.
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The external user.
    User,
    /// A support agent.
    Admin,
    /// The assistant.
    Ai,
}

/// When a message was sent.
///
/// Seed data carries pre-rendered labels; messages sent at runtime carry the
/// instant they were appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timestamp {
    Label(String),
    At(DateTime<Utc>),
}

impl Timestamp {
    /// Timestamp for a message appended right now.
    pub fn now() -> Self {
        Self::At(Utc::now())
    }

    /// Fixed label timestamp.
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }

    /// Render relative to `now`.
    pub fn display_at(&self, now: DateTime<Utc>) -> String {
        match self {
            Self::Label(label) => label.clone(),
            Self::At(at) => {
                let age = now.signed_duration_since(*at);
                if age.num_minutes() < 1 {
                    "Just now".to_string()
                } else if age.num_hours() < 1 {
                    format!("{}m", age.num_minutes())
                } else {
                    format!("{}h", age.num_hours())
                }
            }
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_at(Utc::now()))
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub seen: bool,
}

impl Message {
    /// Create an unseen message.
    pub fn new(
        id: impl Into<String>,
        sender: Sender,
        text: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            sender,
            text: text.into(),
            timestamp,
            seen: false,
        }
    }

    /// Create an outgoing admin message stamped with the current time.
    pub fn outgoing(text: impl Into<String>) -> Self {
        Self::new(
            Uuid::new_v4().to_string(),
            Sender::Admin,
            text,
            Timestamp::now(),
        )
    }

    /// Set the seen flag.
    #[must_use]
    pub fn with_seen(mut self, seen: bool) -> Self {
        self.seen = seen;
        self
    }
}

/// A thread of messages between one external user and the support side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub user: User,
    /// Append-ordered; insertion order is chronological order.
    pub messages: Vec<Message>,
    #[serde(default)]
    pub unread: bool,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

impl Conversation {
    /// The most recent message, derived on every call.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether any message has not been seen yet.
    pub fn has_unseen(&self) -> bool {
        self.messages.iter().any(|m| !m.seen)
    }
}

/// Which panel currently has the single-focus expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpandedPanel {
    #[default]
    None,
    Sidebar,
    Chat,
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn convo(messages: Vec<Message>) -> Conversation {
        Conversation {
            id: "c".into(),
            user: User {
                id: "u".into(),
                name: "Ada".into(),
                company: "Lovelace Inc.".into(),
                avatar_ref: None,
                status: Presence::Online,
            },
            messages,
            unread: false,
            tags: BTreeSet::new(),
            assignee: None,
        }
    }

    #[test]
    fn test_last_message_tracks_appends() {
        let mut c = convo(vec![Message::new(
            "m1",
            Sender::User,
            "hi",
            Timestamp::label("1m"),
        )]);
        assert_eq!(c.last_message().map(|m| m.id.as_str()), Some("m1"));

        c.messages.push(Message::new(
            "m2",
            Sender::Admin,
            "hello",
            Timestamp::label("now"),
        ));
        assert_eq!(c.last_message().map(|m| m.id.as_str()), Some("m2"));
    }

    #[test]
    fn test_last_message_empty() {
        assert!(convo(Vec::new()).last_message().is_none());
    }

    #[test]
    fn test_has_unseen() {
        let seen = Message::new("m1", Sender::Admin, "a", Timestamp::label("1m")).with_seen(true);
        assert!(!convo(vec![seen.clone()]).has_unseen());

        let unseen = Message::new("m2", Sender::User, "b", Timestamp::label("1m"));
        assert!(convo(vec![seen, unseen]).has_unseen());
    }

    #[test]
    fn test_timestamp_display() {
        let now = Utc::now();
        assert_eq!(Timestamp::label("45m").display_at(now), "45m");
        assert_eq!(Timestamp::At(now).display_at(now), "Just now");
        assert_eq!(
            Timestamp::At(now - Duration::minutes(5)).display_at(now),
            "5m"
        );
        assert_eq!(
            Timestamp::At(now - Duration::hours(3)).display_at(now),
            "3h"
        );
    }

    #[test]
    fn test_outgoing_message() {
        let msg = Message::outgoing("On it");
        assert_eq!(msg.sender, Sender::Admin);
        assert_eq!(msg.text, "On it");
        assert!(!msg.seen);
        assert!(matches!(msg.timestamp, Timestamp::At(_)));
        assert!(!msg.id.is_empty());
    }

    #[test]
    fn test_user_initial() {
        let c = convo(Vec::new());
        assert_eq!(c.user.initial(), 'A');
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&Sender::Ai).unwrap();
        assert_eq!(json, "\"ai\"");
    }
}
