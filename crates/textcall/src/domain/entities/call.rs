//! Call - Session lifecycle record
//!
//! The single shared document contended by the two parties of a call.
//! All state-machine validity checks live here, independent of any
//! rendering or transport layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{CallStatus, SessionId, Username};

/// One ringing/active/ended session between two users.
///
/// Keyed by the pair-derived [`SessionId`]; a later call between the same
/// pair reuses the key and overwrites status and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Call {
    pub session_id: SessionId,
    pub caller: Username,
    pub recipient: Username,
    pub status: CallStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub summary: Option<String>,
}

impl Call {
    /// Create a fresh ringing call from `caller` to `recipient`.
    pub fn ring(caller: Username, recipient: Username) -> Self {
        Self {
            session_id: SessionId::for_pair(&caller, &recipient),
            caller,
            recipient,
            status: CallStatus::Ringing,
            started_at: Utc::now(),
            ended_at: None,
            summary: None,
        }
    }

    /// Recipient picks up. Valid only while ringing.
    pub fn accept(&mut self) -> Result<(), DomainError> {
        match self.status {
            CallStatus::Ringing => {
                self.status = CallStatus::Active;
                Ok(())
            }
            from => Err(DomainError::invalid_transition("accept", from)),
        }
    }

    /// Reject (recipient) or cancel (caller) while ringing.
    ///
    /// Returns `Ok(false)` without touching state when the call already
    /// ended, so retries are harmless.
    pub fn decline(&mut self) -> Result<bool, DomainError> {
        match self.status {
            CallStatus::Ringing => {
                self.end_now();
                Ok(true)
            }
            CallStatus::Ended => Ok(false),
            from => Err(DomainError::invalid_transition("decline", from)),
        }
    }

    /// Either party hangs up an active call.
    ///
    /// Returns `Ok(false)` without touching state when the call already
    /// ended — both parties hanging up at once converges on the same
    /// terminal value.
    pub fn hang_up(&mut self) -> Result<bool, DomainError> {
        match self.status {
            CallStatus::Active => {
                self.end_now();
                Ok(true)
            }
            CallStatus::Ended => Ok(false),
            from => Err(DomainError::invalid_transition("hang up", from)),
        }
    }

    fn end_now(&mut self) {
        self.status = CallStatus::Ended;
        self.ended_at = Some(Utc::now());
    }

    /// How long the call lasted, once it has ended.
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.ended_at.map(|ended| ended - self.started_at)
    }
}

/// Read-only aggregate of a completed call, for display.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub caller: Username,
    pub recipient: Username,
    pub started_at: DateTime<Utc>,
    pub duration_secs: Option<i64>,
    pub summary: String,
}

impl SessionSummary {
    /// Build the view for an ended call. Returns `None` while the call is
    /// still in flight.
    pub fn from_call(call: &Call) -> Option<Self> {
        if call.status != CallStatus::Ended {
            return None;
        }

        Some(Self {
            session_id: call.session_id.clone(),
            caller: call.caller.clone(),
            recipient: call.recipient.clone(),
            started_at: call.started_at,
            duration_secs: call.duration().map(|d| d.num_seconds()),
            summary: call
                .summary
                .clone()
                .unwrap_or_else(|| "No summary available.".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ringing_call() -> Call {
        Call::ring(
            Username::parse("alice").unwrap(),
            Username::parse("bob").unwrap(),
        )
    }

    #[test]
    fn ring_starts_in_ringing_state() {
        let call = ringing_call();
        assert_eq!(call.status, CallStatus::Ringing);
        assert_eq!(call.session_id.as_str(), "alice_bob");
        assert!(call.ended_at.is_none());
        assert!(call.summary.is_none());
    }

    #[test]
    fn accept_moves_ringing_to_active() {
        let mut call = ringing_call();
        call.accept().unwrap();
        assert_eq!(call.status, CallStatus::Active);
    }

    #[test]
    fn accept_rejected_outside_ringing() {
        let mut call = ringing_call();
        call.accept().unwrap();

        let err = call.accept().unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(call.status, CallStatus::Active);
    }

    #[test]
    fn decline_ends_a_ringing_call() {
        let mut call = ringing_call();
        assert!(call.decline().unwrap());
        assert_eq!(call.status, CallStatus::Ended);
        assert!(call.ended_at.is_some());
    }

    #[test]
    fn decline_is_invalid_once_active() {
        let mut call = ringing_call();
        call.accept().unwrap();
        assert!(call.decline().is_err());
    }

    #[test]
    fn hang_up_requires_active() {
        let mut call = ringing_call();
        assert!(call.hang_up().is_err());

        call.accept().unwrap();
        assert!(call.hang_up().unwrap());
        assert_eq!(call.status, CallStatus::Ended);
    }

    #[test]
    fn repeated_hang_up_is_a_no_op() {
        let mut call = ringing_call();
        call.accept().unwrap();
        assert!(call.hang_up().unwrap());

        let first_ended_at = call.ended_at;
        assert!(!call.hang_up().unwrap());
        assert_eq!(call.ended_at, first_ended_at);
    }

    #[test]
    fn session_summary_only_for_ended_calls() {
        let mut call = ringing_call();
        assert!(SessionSummary::from_call(&call).is_none());

        call.accept().unwrap();
        call.hang_up().unwrap();

        let view = SessionSummary::from_call(&call).unwrap();
        assert_eq!(view.summary, "No summary available.");
        assert!(view.duration_secs.is_some());
    }
}
