//! Message models and the per-session message store.

pub mod clock;
pub mod conversation;
pub mod relative_time;
pub mod seed;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use conversation::{Conversation, FlaggedMessage};
pub use relative_time::format_relative;
pub use store::MessageStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use swingsfab_profiles::UserId;

/// Identifier of a message. Unique within a conversation and increasing in send order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of a two-person conversation wrote the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Me,
    Them,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved: Option<bool>,
}

impl Message {
    pub fn is_read(&self) -> bool {
        self.read.unwrap_or(false)
    }

    pub fn is_saved(&self) -> bool {
        self.saved.unwrap_or(false)
    }

    pub fn is_mine(&self) -> bool {
        self.sender == Sender::Me
    }
}

/// Messaging-specific errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MessagingError {
    #[error("invalid message: {0}")]
    Validation(String),
    #[error("no conversation with {0}")]
    ConversationNotFound(UserId),
    #[error("message {message} not found in conversation with {counterpart}")]
    MessageNotFound {
        counterpart: UserId,
        message: MessageId,
    },
}

impl MessagingError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MessagingError::ConversationNotFound(_) | MessagingError::MessageNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MessagingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_read_as_false() {
        let message = Message {
            id: MessageId(1),
            text: "hi".into(),
            sender: Sender::Them,
            date: Utc::now(),
            read: None,
            saved: None,
        };
        assert!(!message.is_read());
        assert!(!message.is_saved());
        assert!(!message.is_mine());
    }

    #[test]
    fn unset_flags_are_omitted_from_json() {
        let message = Message {
            id: MessageId(7),
            text: "hello".into(),
            sender: Sender::Me,
            date: Utc::now(),
            read: Some(true),
            saved: None,
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["sender"], "me");
        assert_eq!(json["read"], true);
        assert!(json.get("saved").is_none());

        let back: Message = serde_json::from_value(json).unwrap();
        assert_eq!(back, message);
    }

    #[test]
    fn not_found_variants_are_classified() {
        assert!(MessagingError::ConversationNotFound(UserId(3)).is_not_found());
        assert!(!MessagingError::Validation("empty".into()).is_not_found());
    }
}
