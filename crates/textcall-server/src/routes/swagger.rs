//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{SummaryRequest, SummaryResponse, TranscriptLine};

#[derive(OpenApi)]
#[openapi(
    paths(super::summary::generate_summary),
    info(
        title = "TextCall API",
        version = "0.1.0",
        description = "TextCall - text-call signaling core\n\nRing, chat, hang up; finished transcripts are summarized automatically.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Summary", description = "Transcript summarization facade"),
    ),
    components(schemas(TranscriptLine, SummaryRequest, SummaryResponse)),
)]
pub struct ApiDoc;
