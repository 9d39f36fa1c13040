//! User Directory Port
//!
//! Abstract interface over the `users` / `usernames` collection pair.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, User, Username};

/// Directory of account-id <-> username mappings.
///
/// The forward and reverse mappings must be written atomically; a race
/// between two accounts claiming the same username lets exactly one
/// succeed. A detected divergence between the two mappings surfaces as
/// [`DomainError::Consistency`] and is fatal to the operation.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Claim `username` for `account_id`, checking uniqueness and writing
    /// both mappings as one atomic operation.
    ///
    /// Re-claiming the name an account already owns returns the existing
    /// record; usernames are otherwise immutable.
    async fn claim_username(
        &self,
        account_id: &str,
        username: &Username,
    ) -> Result<User, DomainError>;

    /// The username claimed by an account, if any.
    async fn username_of(&self, account_id: &str) -> Result<Option<Username>, DomainError>;

    /// The account owning a username, if any.
    async fn account_of(&self, username: &Username) -> Result<Option<String>, DomainError>;
}
