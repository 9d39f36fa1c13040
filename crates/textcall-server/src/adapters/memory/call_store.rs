//! In-memory implementation of CallStore

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use textcall::{
    Call, CallStatus, CallStore, CallTransition, DomainError, SessionId, Subscription, Username,
};

use super::{notify, StoreInner, Watcher};

/// In-memory implementation of [`CallStore`].
///
/// Writes to one document are linearized by the calls mutex; watchers are
/// notified inside the same critical section, so no observer can see
/// notifications out of write order.
pub struct MemoryCallStore {
    pub(crate) inner: Arc<StoreInner>,
}

#[async_trait]
impl CallStore for MemoryCallStore {
    async fn find(&self, session_id: &SessionId) -> Result<Option<Call>, DomainError> {
        Ok(self.inner.calls.lock().docs.get(session_id).cloned())
    }

    async fn put(&self, call: &Call) -> Result<(), DomainError> {
        let mut calls = self.inner.calls.lock();
        let before = calls.docs.insert(call.session_id.clone(), call.clone());

        if let Some(watchers) = calls.doc_watchers.get_mut(&call.session_id) {
            notify(watchers, call);
        }
        if call.status == CallStatus::Ringing {
            if let Some(watchers) = calls.incoming_watchers.get_mut(&call.recipient) {
                notify(watchers, call);
            }
        }

        let transition = CallTransition {
            before,
            after: call.clone(),
        };
        notify(&mut calls.transition_watchers, &transition);

        Ok(())
    }

    async fn merge_summary(
        &self,
        session_id: &SessionId,
        summary: &str,
    ) -> Result<bool, DomainError> {
        let mut calls = self.inner.calls.lock();
        let doc = calls
            .docs
            .get_mut(session_id)
            .ok_or_else(|| DomainError::UnknownSession(session_id.to_string()))?;

        if doc.summary.is_some() {
            return Ok(false);
        }

        let before = Some(doc.clone());
        doc.summary = Some(summary.to_string());
        let after = doc.clone();

        if let Some(watchers) = calls.doc_watchers.get_mut(session_id) {
            notify(watchers, &after);
        }
        notify(&mut calls.transition_watchers, &CallTransition { before, after });

        Ok(true)
    }

    async fn watch(&self, session_id: &SessionId) -> Result<Subscription<Call>, DomainError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let watcher_id = self.inner.next_watcher_id();

        {
            let mut calls = self.inner.calls.lock();
            if let Some(current) = calls.docs.get(session_id) {
                let _ = tx.send(current.clone());
            }
            calls
                .doc_watchers
                .entry(session_id.clone())
                .or_default()
                .push(Watcher { id: watcher_id, tx });
        }

        let inner = self.inner.clone();
        let key = session_id.clone();
        Ok(Subscription::new(
            rx,
            Box::new(move || {
                let mut calls = inner.calls.lock();
                if let Some(watchers) = calls.doc_watchers.get_mut(&key) {
                    watchers.retain(|w| w.id != watcher_id);
                    if watchers.is_empty() {
                        calls.doc_watchers.remove(&key);
                    }
                }
            }),
        ))
    }

    async fn watch_incoming(
        &self,
        recipient: &Username,
    ) -> Result<Subscription<Call>, DomainError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let watcher_id = self.inner.next_watcher_id();

        {
            let mut calls = self.inner.calls.lock();

            let mut ringing: Vec<Call> = calls
                .docs
                .values()
                .filter(|c| c.status == CallStatus::Ringing && &c.recipient == recipient)
                .cloned()
                .collect();
            ringing.sort_by_key(|c| c.started_at);
            for call in ringing {
                let _ = tx.send(call);
            }

            calls
                .incoming_watchers
                .entry(recipient.clone())
                .or_default()
                .push(Watcher { id: watcher_id, tx });
        }

        let inner = self.inner.clone();
        let key = recipient.clone();
        Ok(Subscription::new(
            rx,
            Box::new(move || {
                let mut calls = inner.calls.lock();
                if let Some(watchers) = calls.incoming_watchers.get_mut(&key) {
                    watchers.retain(|w| w.id != watcher_id);
                    if watchers.is_empty() {
                        calls.incoming_watchers.remove(&key);
                    }
                }
            }),
        ))
    }

    async fn watch_transitions(&self) -> Result<Subscription<CallTransition>, DomainError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let watcher_id = self.inner.next_watcher_id();

        self.inner
            .calls
            .lock()
            .transition_watchers
            .push(Watcher { id: watcher_id, tx });

        let inner = self.inner.clone();
        Ok(Subscription::new(
            rx,
            Box::new(move || {
                inner
                    .calls
                    .lock()
                    .transition_watchers
                    .retain(|w| w.id != watcher_id);
            }),
        ))
    }

    async fn calls_involving(&self, username: &Username) -> Result<Vec<Call>, DomainError> {
        let calls = self.inner.calls.lock();
        let mut involved: Vec<Call> = calls
            .docs
            .values()
            .filter(|c| &c.caller == username || &c.recipient == username)
            .cloned()
            .collect();

        involved.sort_by(|a, b| {
            b.started_at
                .cmp(&a.started_at)
                .then_with(|| a.session_id.as_str().cmp(b.session_id.as_str()))
        });

        Ok(involved)
    }
}
