//! Call Store Port
//!
//! Abstract interface over the `calls` collection, with the realtime
//! watches both parties and the summary pipeline depend on.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{errors::DomainError, Call, SessionId, Username};
use crate::ports::subscription::Subscription;

/// One observed change to a call document: the value before the write
/// (absent on creation) and the value after.
///
/// This is what makes the summary pipeline edge-triggered rather than
/// level-triggered: a handler can fire on the specific `before -> after`
/// status pair instead of on every sighting of the destination state.
#[derive(Debug, Clone, Serialize)]
pub struct CallTransition {
    pub before: Option<Call>,
    pub after: Call,
}

/// Store of call documents keyed by [`SessionId`].
///
/// Writes to one document are linearized by the store; there is no
/// cross-document ordering guarantee and none is needed.
#[async_trait]
pub trait CallStore: Send + Sync {
    /// Read one call document.
    async fn find(&self, session_id: &SessionId) -> Result<Option<Call>, DomainError>;

    /// Write (create or overwrite) one call document and notify watchers.
    async fn put(&self, call: &Call) -> Result<(), DomainError>;

    /// Merge a summary onto an ended call. Touches nothing but the
    /// `summary` field — status and timestamps cannot regress through this
    /// write — and refuses to overwrite a summary already present.
    ///
    /// Returns `true` if the summary was written, `false` if one already
    /// existed.
    async fn merge_summary(
        &self,
        session_id: &SessionId,
        summary: &str,
    ) -> Result<bool, DomainError>;

    /// Watch one call document: the current value immediately (when the
    /// document exists), then every subsequent write.
    async fn watch(&self, session_id: &SessionId) -> Result<Subscription<Call>, DomainError>;

    /// Watch the narrow incoming-call query: call documents with
    /// `status == ringing` addressed to `recipient`, continuously
    /// evaluated. Current matches are delivered on subscribe.
    async fn watch_incoming(
        &self,
        recipient: &Username,
    ) -> Result<Subscription<Call>, DomainError>;

    /// Watch every call document write as a before/after pair. No initial
    /// snapshot; edge events only. This is the feed the summary pipeline
    /// trigger consumes, decoupled from any client session.
    async fn watch_transitions(&self) -> Result<Subscription<CallTransition>, DomainError>;

    /// All calls involving a user, in either role, as one deterministic
    /// query: sorted by `started_at` descending, ties broken by session id.
    async fn calls_involving(&self, username: &Username) -> Result<Vec<Call>, DomainError>;
}
