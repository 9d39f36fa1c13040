//! In-memory implementation of MessageLog

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;
use uuid::Uuid;

use textcall::{DomainError, Message, MessageLog, SessionId, Subscription, Username};

use super::{notify, StoreInner, Watcher};

/// In-memory implementation of [`MessageLog`].
///
/// `created_at` is clamped against the previous entry so the per-session
/// ordering key never decreases even if the clock does; `seq` carries the
/// insertion order for ties.
pub struct MemoryMessageLog {
    pub(crate) inner: Arc<StoreInner>,
}

#[async_trait]
impl MessageLog for MemoryMessageLog {
    async fn append(
        &self,
        session_id: &SessionId,
        sender: &Username,
        text: &str,
    ) -> Result<Message, DomainError> {
        let mut messages = self.inner.messages.lock();
        let log = messages.logs.entry(session_id.clone()).or_default();

        let now = Utc::now();
        let created_at = match log.last() {
            Some(prev) if prev.created_at > now => prev.created_at,
            _ => now,
        };

        let message = Message {
            id: Uuid::new_v4(),
            sender: sender.clone(),
            text: text.to_string(),
            created_at,
            seq: log.len() as u64,
        };
        log.push(message.clone());
        let snapshot = log.clone();

        if let Some(watchers) = messages.watchers.get_mut(session_id) {
            notify(watchers, &snapshot);
        }

        Ok(message)
    }

    async fn history(&self, session_id: &SessionId) -> Result<Vec<Message>, DomainError> {
        Ok(self
            .inner
            .messages
            .lock()
            .logs
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn watch(
        &self,
        session_id: &SessionId,
    ) -> Result<Subscription<Vec<Message>>, DomainError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let watcher_id = self.inner.next_watcher_id();

        {
            let mut messages = self.inner.messages.lock();
            let snapshot = messages.logs.get(session_id).cloned().unwrap_or_default();
            let _ = tx.send(snapshot);
            messages
                .watchers
                .entry(session_id.clone())
                .or_default()
                .push(Watcher { id: watcher_id, tx });
        }

        let inner = self.inner.clone();
        let key = session_id.clone();
        Ok(Subscription::new(
            rx,
            Box::new(move || {
                let mut messages = inner.messages.lock();
                if let Some(watchers) = messages.watchers.get_mut(&key) {
                    watchers.retain(|w| w.id != watcher_id);
                    if watchers.is_empty() {
                        messages.watchers.remove(&key);
                    }
                }
            }),
        ))
    }
}
