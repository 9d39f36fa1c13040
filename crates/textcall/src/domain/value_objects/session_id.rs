//! SessionId - Pair-derived call session key

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Username;

/// Identifies the one call document (and its message log) shared by a pair
/// of users. Derived from the unordered pair, so whichever party initiates,
/// both land on the same document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Derive the session key for a pair of users.
    ///
    /// Deterministic and commutative: `for_pair(a, b) == for_pair(b, a)`.
    pub fn for_pair(a: &Username, b: &Username) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self(format!("{}_{}", first.as_str(), second.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
