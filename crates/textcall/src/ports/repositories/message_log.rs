//! Message Log Port
//!
//! Abstract interface over the per-session `messages` collections.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Message, SessionId, Username};
use crate::ports::subscription::Subscription;

/// Append-only ordered message log, scoped per session.
///
/// `id`, `created_at` and `seq` are assigned at append time; `created_at`
/// is monotonically non-decreasing within a session and `seq` breaks ties
/// by insertion order. Unbounded growth is acceptable for this scope.
#[async_trait]
pub trait MessageLog: Send + Sync {
    /// Append a message and return it with its log-assigned fields.
    async fn append(
        &self,
        session_id: &SessionId,
        sender: &Username,
        text: &str,
    ) -> Result<Message, DomainError>;

    /// The full log, ordered by `created_at` (ties by `seq`).
    async fn history(&self, session_id: &SessionId) -> Result<Vec<Message>, DomainError>;

    /// Watch a session's log: the full current ordered log immediately
    /// (possibly empty), then the full updated log on every append. There
    /// is no separate "new message" event type.
    async fn watch(&self, session_id: &SessionId)
        -> Result<Subscription<Vec<Message>>, DomainError>;
}
