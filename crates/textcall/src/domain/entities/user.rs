//! User - Account identity with its claimed username

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Username;

/// An account that has completed its one-time username claim.
///
/// `account_id` is opaque and assigned by the auth collaborator. The
/// username is immutable once claimed; there is no rename path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub account_id: String,
    pub username: Username,
}

impl User {
    pub fn new(account_id: impl Into<String>, username: Username) -> Self {
        Self {
            account_id: account_id.into(),
            username,
        }
    }
}
