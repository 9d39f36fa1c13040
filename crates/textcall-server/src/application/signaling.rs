//! Signaling Application Service (Use Case)
//!
//! The call state machine: owns every lifecycle mutation of a call
//! document and the watches both parties react through. Any UI is a pure
//! observer of the streams returned here, with no authority of its own.

use std::sync::Arc;

use textcall::{
    Call, CallStatus, CallStore, DomainError, SessionId, Subscription, UserDirectory, Username,
};

/// Application service for call lifecycle operations
pub struct SignalingService<C: CallStore, D: UserDirectory> {
    calls: Arc<C>,
    directory: Arc<D>,
}

impl<C: CallStore, D: UserDirectory> SignalingService<C, D> {
    pub fn new(calls: Arc<C>, directory: Arc<D>) -> Self {
        Self { calls, directory }
    }

    /// Ring a recipient: verify they exist, derive the pair's session id,
    /// and write a fresh ringing call.
    ///
    /// An `Ended` remnant at the same id is overwritten (the pair's id is
    /// reused across calls); a still-live call means the recipient is
    /// busy. The busy check is read-before-write, best-effort: racing
    /// initiators collide on the same document and converge to a single
    /// ringing record either way.
    pub async fn initiate(
        &self,
        caller: &Username,
        recipient: &Username,
    ) -> Result<SessionId, DomainError> {
        if self.directory.account_of(recipient).await?.is_none() {
            return Err(DomainError::UnknownRecipient(recipient.to_string()));
        }

        let session_id = SessionId::for_pair(caller, recipient);
        if let Some(existing) = self.calls.find(&session_id).await? {
            if existing.status != CallStatus::Ended {
                return Err(DomainError::RecipientBusy(recipient.to_string()));
            }
        }

        let call = Call::ring(caller.clone(), recipient.clone());
        self.calls.put(&call).await?;

        tracing::info!("Call {} ringing: {} -> {}", session_id, caller, recipient);

        Ok(session_id)
    }

    /// Recipient picks up a ringing call.
    pub async fn accept(&self, session_id: &SessionId) -> Result<(), DomainError> {
        let mut call = self.require(session_id).await?;
        call.accept()?;
        self.calls.put(&call).await?;

        tracing::info!("Call {} active", session_id);

        Ok(())
    }

    /// Recipient declines a ringing call. Returns `false` when the call
    /// had already ended (harmless retry).
    pub async fn reject(&self, session_id: &SessionId) -> Result<bool, DomainError> {
        self.decline(session_id, "rejected").await
    }

    /// Caller gives up while still ringing. Returns `false` when the call
    /// had already ended.
    pub async fn cancel(&self, session_id: &SessionId) -> Result<bool, DomainError> {
        self.decline(session_id, "canceled").await
    }

    async fn decline(&self, session_id: &SessionId, verb: &str) -> Result<bool, DomainError> {
        let mut call = self.require(session_id).await?;
        if !call.decline()? {
            return Ok(false);
        }
        self.calls.put(&call).await?;

        tracing::info!("Call {} {} while ringing", session_id, verb);

        Ok(true)
    }

    /// Either party ends an active call. Returns `false` when the call had
    /// already ended — simultaneous hangups converge on the same terminal
    /// state.
    pub async fn hangup(&self, session_id: &SessionId) -> Result<bool, DomainError> {
        let mut call = self.require(session_id).await?;
        if !call.hang_up()? {
            return Ok(false);
        }
        self.calls.put(&call).await?;

        tracing::info!("Call {} ended", session_id);

        Ok(true)
    }

    /// Watch one call document: current value first, then every change.
    /// How a party notices transitions it did not itself cause.
    pub async fn observe(&self, session_id: &SessionId) -> Result<Subscription<Call>, DomainError> {
        self.calls.watch(session_id).await
    }

    /// Watch for ringing calls addressed to `recipient`.
    pub async fn incoming_for(
        &self,
        recipient: &Username,
    ) -> Result<Subscription<Call>, DomainError> {
        self.calls.watch_incoming(recipient).await
    }

    /// All calls involving a user, newest first.
    pub async fn calls_involving(&self, username: &Username) -> Result<Vec<Call>, DomainError> {
        self.calls.calls_involving(username).await
    }

    async fn require(&self, session_id: &SessionId) -> Result<Call, DomainError> {
        self.calls
            .find(session_id)
            .await?
            .ok_or_else(|| DomainError::UnknownSession(session_id.to_string()))
    }
}
