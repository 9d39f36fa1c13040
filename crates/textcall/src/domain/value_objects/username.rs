//! Username - Unique handle chosen once per account

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 20;

/// A claimed, validated username.
///
/// 3-20 ascii lowercase alphanumerics. The charset excludes `_` so that the
/// pair-derived session key stays unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate a raw handle.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.len() < MIN_LEN || raw.len() > MAX_LEN {
            return Err(DomainError::Validation(format!(
                "username must be {}-{} characters, got {}",
                MIN_LEN,
                MAX_LEN,
                raw.len()
            )));
        }

        if !raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(DomainError::Validation(format!(
                "username '{}' may only contain lowercase letters and digits",
                raw
            )));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}
