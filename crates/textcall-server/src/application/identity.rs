//! Identity Application Service (Use Case)
//!
//! Orchestrates the one-time username claim and account resolution.

use std::sync::Arc;

use textcall::{DomainError, User, UserDirectory, Username};

/// Application service for identity operations
pub struct IdentityService<D: UserDirectory> {
    directory: Arc<D>,
}

impl<D: UserDirectory> IdentityService<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Validate and claim a username for an account.
    ///
    /// The uniqueness check and both mapping writes happen atomically in
    /// the directory; a losing racer gets [`DomainError::UsernameTaken`].
    pub async fn claim_username(
        &self,
        account_id: &str,
        desired: &str,
    ) -> Result<User, DomainError> {
        let username = Username::parse(desired)?;
        let user = self.directory.claim_username(account_id, &username).await?;

        tracing::info!("Registered '{}' for account {}", user.username, account_id);

        Ok(user)
    }

    /// The username an account claimed, if any.
    pub async fn resolve(&self, account_id: &str) -> Result<Option<Username>, DomainError> {
        self.directory.username_of(account_id).await
    }
}
