//! HTTP Models
//!
//! Request/response DTOs for the summary facade.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One `sender: text` line of a transcript.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TranscriptLine {
    pub sender: String,
    pub text: String,
}

/// Request body for `POST /summary`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SummaryRequest {
    pub messages: Vec<TranscriptLine>,
}

/// Response for `POST /summary`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryResponse {
    pub summary: String,
}
