//! Message - One line of a session's chat log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Username;

/// A single chat message, scoped to exactly one session.
///
/// `id`, `created_at` and `seq` are assigned by the log at write time;
/// `created_at` is non-decreasing within a session and `seq` breaks ties by
/// insertion order. Messages are append-only and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Username,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub seq: u64,
}

/// Render an ordered log as `sender: text` lines, one per message — the
/// transcript shape handed to the summarization collaborator.
pub fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.sender, m.text))
        .collect::<Vec<_>>()
        .join("\n")
}
