//! Static seed data loaded once at startup.

use crate::model::{Conversation, Message, Presence, Sender, Timestamp, User};
use std::collections::BTreeSet;

/// Quick queries offered as suggestion chips in the assistant panel.
pub const SUGGESTED_QUERIES: &[&str] = &[
    "How do I get a refund?",
    "What's your return policy?",
    "Can I exchange my order?",
    "Where is my order?",
];

fn user(id: &str, name: &str, company: &str, avatar: Option<&str>, status: Presence) -> User {
    User {
        id: id.into(),
        name: name.into(),
        company: company.into(),
        avatar_ref: avatar.map(Into::into),
        status,
    }
}

fn msg(id: &str, sender: Sender, text: &str, at: &str) -> Message {
    Message::new(id, sender, text, Timestamp::label(at))
}

fn tags(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|t| (*t).to_string()).collect()
}

/// Build the seed conversations.
pub fn conversations() -> Vec<Conversation> {
    vec![
        Conversation {
            id: "c1".into(),
            user: user("u1", "Luis", "Github", Some("/avatars/luis.jpg"), Presence::Online),
            messages: vec![
                msg(
                    "m1",
                    Sender::User,
                    "I bought a product from your store in November as a Christmas gift for a \
                     member of my family. However, it turns out they have something very similar \
                     already. I was hoping you'd be able to refund me, as it is un-opened.",
                    "1min",
                ),
                msg(
                    "m2",
                    Sender::Admin,
                    "Let me just look into this for you, Luis.",
                    "1min",
                )
                .with_seen(true),
            ],
            unread: false,
            tags: BTreeSet::new(),
            assignee: Some("Brian Byrne".into()),
        },
        Conversation {
            id: "c2".into(),
            user: user("u2", "Ivan", "Nike", None, Presence::Online),
            messages: vec![
                msg(
                    "m3",
                    Sender::User,
                    "Hi there, I have a question about your Nike shoes. Do you have them in size 10?",
                    "30m",
                ),
                msg("m4", Sender::Admin, "Let me check our inventory for you.", "25m"),
                msg(
                    "m5",
                    Sender::Admin,
                    "Yes, we have Nike Air Max in size 10. Would you like me to reserve a pair for you?",
                    "24m",
                ),
            ],
            unread: true,
            tags: tags(&["lemon"]),
            assignee: None,
        },
        Conversation {
            id: "c3".into(),
            user: user("u3", "Lead", "from New York", None, Presence::Offline),
            messages: vec![msg(
                "m6",
                Sender::User,
                "Good morning, let me know if you have any special offers this week.",
                "45m",
            )],
            unread: false,
            tags: tags(&["priority"]),
            assignee: None,
        },
        Conversation {
            id: "c4".into(),
            user: user("u4", "Luis", "Small Crafts", None, Presence::Offline),
            messages: vec![
                msg("m7", Sender::User, "Bug report", "45m"),
                msg(
                    "m8",
                    Sender::Admin,
                    "Thanks for reporting this issue. Our developers will look into it.",
                    "40m",
                ),
            ],
            unread: false,
            tags: tags(&["bug"]),
            assignee: None,
        },
        Conversation {
            id: "c5".into(),
            user: user("u5", "Miracle", "Exemplary Bank", None, Presence::Away),
            messages: vec![
                msg(
                    "m9",
                    Sender::User,
                    "Hey there, I'm here to discuss my loan application.",
                    "45m",
                ),
                msg(
                    "m10",
                    Sender::Admin,
                    "I'd be happy to help with your loan application. Could you provide your \
                     reference number?",
                    "40m",
                ),
            ],
            unread: false,
            tags: BTreeSet::new(),
            assignee: None,
        },
    ]
}
