//! Simulated replies from the counterpart after a chat message.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use swingsfab_messaging::{MessageStore, Sender};
use swingsfab_profiles::UserId;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Pending reply timers, grouped by counterpart.
///
/// Every timer is aborted when the scheduler is dropped.
#[derive(Debug, Default)]
pub struct ReplyScheduler {
    pending: HashMap<UserId, Vec<JoinHandle<()>>>,
}

impl ReplyScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text` from `counterpart` once `delay` has passed.
    pub fn schedule(
        &mut self,
        store: Arc<RwLock<MessageStore>>,
        counterpart: UserId,
        delay: Duration,
        text: String,
    ) {
        self.prune();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut store = store.write().await;
            match store.append(counterpart, &text, Sender::Them) {
                Ok(message) => {
                    info!(counterpart = %counterpart, message_id = %message.id, "simulated reply delivered")
                }
                Err(err) => warn!(counterpart = %counterpart, error = %err, "simulated reply dropped"),
            }
        });

        self.pending.entry(counterpart).or_default().push(handle);
        debug!(counterpart = %counterpart, delay_ms = delay.as_millis() as u64, "reply scheduled");
    }

    /// Aborts replies still waiting for `counterpart`. Returns how many were stopped.
    pub fn cancel(&mut self, counterpart: UserId) -> usize {
        let cancelled = self
            .pending
            .remove(&counterpart)
            .map_or(0, abort_all);
        if cancelled > 0 {
            info!(counterpart = %counterpart, cancelled, "pending replies cancelled");
        }
        cancelled
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled: usize = self
            .pending
            .drain()
            .map(|(_, handles)| abort_all(handles))
            .sum();
        if cancelled > 0 {
            info!(cancelled, "all pending replies cancelled");
        }
        cancelled
    }

    /// Replies for `counterpart` that have not fired yet.
    pub fn pending(&self, counterpart: UserId) -> usize {
        self.pending
            .get(&counterpart)
            .map_or(0, |handles| handles.iter().filter(|h| !h.is_finished()).count())
    }

    pub fn total_pending(&self) -> usize {
        self.pending
            .values()
            .flatten()
            .filter(|h| !h.is_finished())
            .count()
    }

    fn prune(&mut self) {
        self.pending.retain(|_, handles| {
            handles.retain(|h| !h.is_finished());
            !handles.is_empty()
        });
    }
}

fn abort_all(handles: Vec<JoinHandle<()>>) -> usize {
    let mut aborted = 0;
    for handle in handles {
        if !handle.is_finished() {
            handle.abort();
            aborted += 1;
        }
    }
    aborted
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JESSICA: UserId = UserId(1);
    const MARK: UserId = UserId(2);

    fn shared_store() -> Arc<RwLock<MessageStore>> {
        Arc::new(RwLock::new(MessageStore::default()))
    }

    // With paused time the runtime jumps straight to each pending timer.
    async fn settle(by: Duration) {
        tokio::time::sleep(by).await;
    }

    #[tokio::test(start_paused = true)]
    async fn reply_fires_after_delay() {
        let store = shared_store();
        let mut replies = ReplyScheduler::new();
        replies.schedule(store.clone(), JESSICA, Duration::from_millis(1500), "hi back".into());
        assert_eq!(replies.pending(JESSICA), 1);

        settle(Duration::from_millis(1499)).await;
        assert!(store.read().await.messages(JESSICA).is_empty());

        settle(Duration::from_millis(2)).await;
        let store = store.read().await;
        let thread = store.messages(JESSICA);
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].sender, Sender::Them);
        assert_eq!(thread[0].text, "hi back");
        assert_eq!(replies.pending(JESSICA), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_suppresses_only_that_counterpart() {
        let store = shared_store();
        let mut replies = ReplyScheduler::new();
        replies.schedule(store.clone(), JESSICA, Duration::from_secs(1), "one".into());
        replies.schedule(store.clone(), JESSICA, Duration::from_secs(2), "two".into());
        replies.schedule(store.clone(), MARK, Duration::from_secs(1), "three".into());

        assert_eq!(replies.cancel(JESSICA), 2);
        assert_eq!(replies.total_pending(), 1);

        settle(Duration::from_secs(3)).await;
        let store = store.read().await;
        assert!(store.messages(JESSICA).is_empty());
        assert_eq!(store.messages(MARK).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_scheduler_cancels_everything() {
        let store = shared_store();
        let mut replies = ReplyScheduler::new();
        replies.schedule(store.clone(), JESSICA, Duration::from_secs(1), "late".into());
        replies.schedule(store.clone(), MARK, Duration::from_secs(1), "late".into());
        drop(replies);

        settle(Duration::from_secs(2)).await;
        assert_eq!(store.read().await.total_messages(), 0);
    }
}
