//! Per-session message store keyed by counterpart.

use crate::clock::{Clock, SystemClock};
use crate::conversation::{Conversation, FlaggedMessage};
use crate::{Message, MessageId, MessagingError, Result, Sender};
use std::collections::HashMap;
use std::sync::Arc;
use swingsfab_profiles::{ProfileStore, UserId};
use tracing::{debug, warn};

/// Ordered message lists per counterpart.
///
/// Only `append` and `toggle_saved` (plus `mark_read`) change it, and nothing is ever
/// removed, so a conversation that appears once stays listed for the session.
#[derive(Debug)]
pub struct MessageStore {
    threads: HashMap<UserId, Vec<Message>>,
    /// Counterparts in first-appearance order, used to break date ties.
    order: Vec<UserId>,
    last_id: u64,
    clock: Arc<dyn Clock>,
}

impl MessageStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            threads: HashMap::new(),
            order: Vec::new(),
            last_id: 0,
            clock,
        }
    }

    /// Builds a store from existing histories, in the given order.
    pub fn from_threads(clock: Arc<dyn Clock>, threads: Vec<(UserId, Vec<Message>)>) -> Self {
        let mut store = Self::new(clock);
        for (counterpart, messages) in threads {
            if messages.is_empty() {
                continue;
            }
            if let Some(max) = messages.iter().map(|m| m.id.0).max() {
                store.last_id = store.last_id.max(max);
            }
            match store.threads.get_mut(&counterpart) {
                Some(existing) => existing.extend(messages),
                None => {
                    store.order.push(counterpart);
                    store.threads.insert(counterpart, messages);
                }
            }
        }
        store
    }

    /// The demo conversations, dated relative to the clock's current time.
    pub fn seeded(clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        Self::from_threads(clock, crate::seed::messages(now))
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Appends a new message to the counterpart's history and returns it.
    ///
    /// Blank text is rejected. The new id is larger than every id in the store, and the
    /// date never precedes the conversation's previous message.
    pub fn append(&mut self, counterpart: UserId, text: &str, sender: Sender) -> Result<Message> {
        if text.trim().is_empty() {
            return Err(MessagingError::Validation(
                "message text must not be empty".to_string(),
            ));
        }

        let now = self.clock.now();
        let now_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;

        if !self.threads.contains_key(&counterpart) {
            self.order.push(counterpart);
        }
        let thread = self.threads.entry(counterpart).or_default();
        let date = thread.last().map_or(now, |last| last.date.max(now));

        let message = Message {
            id: MessageId(id),
            text: text.to_string(),
            sender,
            date,
            read: match sender {
                Sender::Me => Some(true),
                Sender::Them => None,
            },
            saved: None,
        };
        thread.push(message.clone());

        debug!(counterpart = %counterpart, message_id = %message.id, ?sender, "message appended");
        Ok(message)
    }

    /// Flips the saved flag of one message and returns the updated message.
    pub fn toggle_saved(&mut self, counterpart: UserId, message_id: MessageId) -> Result<Message> {
        let thread = self
            .threads
            .get_mut(&counterpart)
            .ok_or(MessagingError::ConversationNotFound(counterpart))?;
        let message = thread
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or(MessagingError::MessageNotFound {
                counterpart,
                message: message_id,
            })?;

        message.saved = Some(!message.is_saved());
        debug!(counterpart = %counterpart, message_id = %message_id, saved = message.is_saved(), "saved flag toggled");
        Ok(message.clone())
    }

    /// Marks every message from the counterpart as read. Returns how many changed.
    pub fn mark_read(&mut self, counterpart: UserId) -> usize {
        let Some(thread) = self.threads.get_mut(&counterpart) else {
            return 0;
        };
        let mut changed = 0;
        for message in thread.iter_mut().filter(|m| m.sender == Sender::Them) {
            if !message.is_read() {
                message.read = Some(true);
                changed += 1;
            }
        }
        changed
    }

    /// Conversations, most recent first.
    ///
    /// With `filter_ids`, only those counterparts are listed. Counterparts without a
    /// profile are skipped.
    pub fn list_conversations(
        &self,
        profiles: &ProfileStore,
        filter_ids: Option<&[UserId]>,
    ) -> Vec<Conversation> {
        let mut conversations: Vec<Conversation> = self
            .order
            .iter()
            .filter(|id| filter_ids.map_or(true, |ids| ids.contains(id)))
            .filter_map(|id| self.conversation(profiles, *id))
            .collect();

        // Stable sort: equal dates keep first-appearance order.
        conversations.sort_by(|a, b| b.last_message.date.cmp(&a.last_message.date));
        conversations
    }

    pub fn conversation(&self, profiles: &ProfileStore, counterpart: UserId) -> Option<Conversation> {
        let messages = self.threads.get(&counterpart)?;
        let Some(profile) = profiles.get(counterpart) else {
            warn!(counterpart = %counterpart, "messages for unknown profile skipped");
            return None;
        };
        Conversation::new(profile.clone(), messages.clone())
    }

    /// Every message I sent, newest first.
    pub fn list_sent(&self) -> Vec<FlaggedMessage> {
        self.flatten(|m| m.sender == Sender::Me)
    }

    /// Every saved message from either side, newest first.
    pub fn list_saved(&self) -> Vec<FlaggedMessage> {
        self.flatten(Message::is_saved)
    }

    fn flatten(&self, keep: impl Fn(&Message) -> bool) -> Vec<FlaggedMessage> {
        let mut flagged = Vec::new();
        for counterpart in &self.order {
            for message in self.messages(*counterpart) {
                if keep(message) {
                    flagged.push(FlaggedMessage {
                        message: message.clone(),
                        counterpart: *counterpart,
                    });
                }
            }
        }
        flagged.sort_by(|a, b| b.message.date.cmp(&a.message.date));
        flagged
    }

    pub fn messages(&self, counterpart: UserId) -> &[Message] {
        self.threads
            .get(&counterpart)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_conversation(&self, counterpart: UserId) -> bool {
        self.threads.contains_key(&counterpart)
    }

    /// Counterparts in first-appearance order.
    pub fn conversation_ids(&self) -> &[UserId] {
        &self.order
    }

    pub fn total_messages(&self) -> usize {
        self.threads.values().map(Vec::len).sum()
    }

    pub fn unread_count(&self, counterpart: UserId) -> usize {
        self.messages(counterpart)
            .iter()
            .filter(|m| m.sender == Sender::Them && !m.is_read())
            .count()
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}
