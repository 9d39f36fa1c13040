//! In-process realtime document store
//!
//! The document-store collaborator deployment used by tests and the
//! single-process server: plain maps behind mutexes, with change
//! notifications fanned out to registered watchers over unbounded
//! channels. One [`MemoryStore`] handle backs all three repository
//! adapters; clones share state.

mod call_store;
mod message_log;
mod user_directory;

pub use call_store::MemoryCallStore;
pub use message_log::MemoryMessageLog;
pub use user_directory::MemoryUserDirectory;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use textcall::{Call, CallTransition, Message, SessionId, Username};

/// A registered change listener: a disposal id plus its channel.
pub(crate) struct Watcher<T> {
    pub(crate) id: u64,
    pub(crate) tx: mpsc::UnboundedSender<T>,
}

/// Fan a value out to every live watcher, pruning any whose subscription
/// has gone away.
pub(crate) fn notify<T: Clone>(watchers: &mut Vec<Watcher<T>>, value: &T) {
    watchers.retain(|w| w.tx.send(value.clone()).is_ok());
}

#[derive(Default)]
pub(crate) struct DirectoryState {
    pub(crate) by_account: HashMap<String, Username>,
    pub(crate) by_username: HashMap<Username, String>,
}

#[derive(Default)]
pub(crate) struct CallsState {
    pub(crate) docs: HashMap<SessionId, Call>,
    pub(crate) doc_watchers: HashMap<SessionId, Vec<Watcher<Call>>>,
    pub(crate) incoming_watchers: HashMap<Username, Vec<Watcher<Call>>>,
    pub(crate) transition_watchers: Vec<Watcher<CallTransition>>,
}

#[derive(Default)]
pub(crate) struct MessagesState {
    pub(crate) logs: HashMap<SessionId, Vec<Message>>,
    pub(crate) watchers: HashMap<SessionId, Vec<Watcher<Vec<Message>>>>,
}

#[derive(Default)]
pub(crate) struct StoreInner {
    pub(crate) directory: Mutex<DirectoryState>,
    pub(crate) calls: Mutex<CallsState>,
    pub(crate) messages: Mutex<MessagesState>,
    watcher_seq: AtomicU64,
}

impl StoreInner {
    pub(crate) fn next_watcher_id(&self) -> u64 {
        self.watcher_seq.fetch_add(1, Ordering::Relaxed)
    }
}

/// Handle to the in-process realtime document store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter over the `users` / `usernames` collection pair.
    pub fn user_directory(&self) -> MemoryUserDirectory {
        MemoryUserDirectory {
            inner: self.inner.clone(),
        }
    }

    /// Adapter over the `calls` collection.
    pub fn call_store(&self) -> MemoryCallStore {
        MemoryCallStore {
            inner: self.inner.clone(),
        }
    }

    /// Adapter over the per-session message logs.
    pub fn message_log(&self) -> MemoryMessageLog {
        MemoryMessageLog {
            inner: self.inner.clone(),
        }
    }
}
