//! In-memory implementation of UserDirectory

use std::sync::Arc;

use async_trait::async_trait;

use textcall::{DomainError, User, UserDirectory, Username};

use super::StoreInner;

/// In-memory implementation of [`UserDirectory`].
///
/// Both mappings live behind one mutex, so the existence check and the two
/// linked writes of a claim are a single atomic operation. Reads verify the
/// mappings still agree and surface [`DomainError::Consistency`] when they
/// do not.
pub struct MemoryUserDirectory {
    pub(crate) inner: Arc<StoreInner>,
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn claim_username(
        &self,
        account_id: &str,
        username: &Username,
    ) -> Result<User, DomainError> {
        let mut directory = self.inner.directory.lock();

        if let Some(existing) = directory.by_account.get(account_id) {
            if existing == username {
                // Retried claim of the name this account already owns.
                return Ok(User::new(account_id, existing.clone()));
            }
            return Err(DomainError::Validation(format!(
                "account is already registered as '{}'",
                existing
            )));
        }

        if directory.by_username.contains_key(username) {
            return Err(DomainError::UsernameTaken(username.to_string()));
        }

        directory
            .by_account
            .insert(account_id.to_string(), username.clone());
        directory
            .by_username
            .insert(username.clone(), account_id.to_string());

        Ok(User::new(account_id, username.clone()))
    }

    async fn username_of(&self, account_id: &str) -> Result<Option<Username>, DomainError> {
        let directory = self.inner.directory.lock();

        let Some(username) = directory.by_account.get(account_id) else {
            return Ok(None);
        };

        match directory.by_username.get(username) {
            Some(owner) if owner == account_id => Ok(Some(username.clone())),
            _ => Err(DomainError::Consistency(format!(
                "'{}' has no matching reverse record",
                username
            ))),
        }
    }

    async fn account_of(&self, username: &Username) -> Result<Option<String>, DomainError> {
        let directory = self.inner.directory.lock();

        let Some(account_id) = directory.by_username.get(username) else {
            return Ok(None);
        };

        match directory.by_account.get(account_id) {
            Some(owned) if owned == username => Ok(Some(account_id.clone())),
            _ => Err(DomainError::Consistency(format!(
                "'{}' has no matching forward record",
                username
            ))),
        }
    }
}
