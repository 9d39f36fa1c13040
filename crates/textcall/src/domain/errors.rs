//! Domain Errors
//!
//! Error types for signaling and identity operations.

use thiserror::Error;

use crate::domain::value_objects::CallStatus;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Another account already owns the requested username.
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    /// The call target does not resolve to a registered account.
    #[error("no user found with username '{0}'")]
    UnknownRecipient(String),

    /// A non-ended call already occupies the pair's session document.
    #[error("'{0}' is busy in another call")]
    RecipientBusy(String),

    /// No call document exists for the session (stale client view).
    #[error("no call found for session '{0}'")]
    UnknownSession(String),

    /// The requested transition is not legal from the call's current state
    /// (stale client view; the caller should resynchronize from its
    /// observed stream).
    #[error("cannot {action} a call that is {from}")]
    InvalidTransition { action: String, from: CallStatus },

    #[error("validation error: {0}")]
    Validation(String),

    /// The forward and reverse username mappings diverged. Fatal to the
    /// identity operation; never swallowed.
    #[error("username mapping inconsistency: {0}")]
    Consistency(String),

    #[error("store error: {0}")]
    Store(String),
}

impl DomainError {
    pub fn invalid_transition<T: AsRef<str>>(action: T, from: CallStatus) -> Self {
        Self::InvalidTransition {
            action: action.as_ref().to_string(),
            from,
        }
    }
}
