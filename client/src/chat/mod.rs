//! Chat window opened from the dashboard.

pub mod reply;

pub use reply::ReplyScheduler;

use crate::config::AppConfig;
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;
use swingsfab_messaging::{Message, MessageStore, Sender};
use swingsfab_profiles::UserProfile;
use tokio::sync::RwLock;
use tracing::info;

/// A chat with one counterpart, backed by the session's message store.
#[derive(Debug)]
pub struct ChatView {
    counterpart: UserProfile,
    store: Arc<RwLock<MessageStore>>,
    reply_delay: Duration,
    reply_text: String,
}

impl ChatView {
    pub fn open(counterpart: UserProfile, store: Arc<RwLock<MessageStore>>, config: &AppConfig) -> Self {
        info!(counterpart = %counterpart.id, "chat opened");
        Self {
            counterpart,
            store,
            reply_delay: config.reply_delay,
            reply_text: config.reply_text.clone(),
        }
    }

    pub fn counterpart(&self) -> &UserProfile {
        &self.counterpart
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.store
            .read()
            .await
            .messages(self.counterpart.id)
            .to_vec()
    }

    /// Sends `text` and queues the counterpart's canned answer.
    pub async fn send(&self, text: &str, replies: &mut ReplyScheduler) -> Result<Message> {
        let message = self
            .store
            .write()
            .await
            .append(self.counterpart.id, text, Sender::Me)?;
        info!(counterpart = %self.counterpart.id, message_id = %message.id, "chat message sent");

        replies.schedule(
            Arc::clone(&self.store),
            self.counterpart.id,
            self.reply_delay,
            self.reply_text.clone(),
        );
        Ok(message)
    }

    /// Closes the window. Replies that have not arrived yet are dropped.
    pub fn close(self, replies: &mut ReplyScheduler) -> usize {
        let cancelled = replies.cancel(self.counterpart.id);
        info!(counterpart = %self.counterpart.id, cancelled, "chat closed");
        cancelled
    }
}
