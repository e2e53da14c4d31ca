//! Conversations derived from the message store.

use crate::{Message, Sender};
use serde::{Deserialize, Serialize};
use swingsfab_profiles::{UserId, UserProfile};

/// A counterpart together with the full message history.
///
/// Never stored. It is rebuilt from the store each time a list is requested, and it exists
/// only while the store holds at least one message for the counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub counterpart: UserProfile,
    pub messages: Vec<Message>,
    pub last_message: Message,
}

impl Conversation {
    /// Returns `None` for an empty history.
    pub fn new(counterpart: UserProfile, messages: Vec<Message>) -> Option<Self> {
        let last_message = messages.last()?.clone();
        Some(Self {
            counterpart,
            messages,
            last_message,
        })
    }

    pub fn counterpart_id(&self) -> UserId {
        self.counterpart.id
    }

    /// Preview line shown in the conversation list.
    pub fn preview(&self) -> String {
        match self.last_message.sender {
            Sender::Me => format!("You: {}", self.last_message.text),
            Sender::Them => self.last_message.text.clone(),
        }
    }

    /// True when the counterpart wrote last and it has not been read.
    pub fn has_unread(&self) -> bool {
        self.last_message.sender == Sender::Them && !self.last_message.is_read()
    }
}

/// A message pulled out of its conversation for the sent and saved lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedMessage {
    pub message: Message,
    pub counterpart: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageId;
    use chrono::Utc;
    use swingsfab_profiles::ProfileStore;

    fn message(id: u64, sender: Sender, read: Option<bool>) -> Message {
        Message {
            id: MessageId(id),
            text: format!("message {id}"),
            sender,
            date: Utc::now(),
            read,
            saved: None,
        }
    }

    #[test]
    fn empty_history_has_no_conversation() {
        let profiles = ProfileStore::seeded();
        let jessica = profiles.get(UserId(1)).unwrap().clone();
        assert!(Conversation::new(jessica, Vec::new()).is_none());
    }

    #[test]
    fn preview_marks_own_messages() {
        let profiles = ProfileStore::seeded();
        let jessica = profiles.get(UserId(1)).unwrap().clone();
        let conv = Conversation::new(jessica, vec![message(1, Sender::Me, Some(true))]).unwrap();
        assert_eq!(conv.preview(), "You: message 1");
        assert!(!conv.has_unread());
    }

    #[test]
    fn unread_only_for_their_last_message() {
        let profiles = ProfileStore::seeded();
        let mark = profiles.get(UserId(2)).unwrap().clone();
        let conv = Conversation::new(
            mark,
            vec![
                message(1, Sender::Me, Some(true)),
                message(2, Sender::Them, None),
            ],
        )
        .unwrap();
        assert_eq!(conv.last_message.id, MessageId(2));
        assert_eq!(conv.preview(), "message 2");
        assert!(conv.has_unread());
    }
}
