//! Summarizer Port
//!
//! Abstract interface for the text-summarization collaborator. Failures
//! here are deliberately a separate taxonomy from [`DomainError`]: a
//! summarizer outage degrades one summary, never a call lifecycle.
//!
//! [`DomainError`]: crate::domain::errors::DomainError

use async_trait::async_trait;
use thiserror::Error;

/// Summarization collaborator failures. All recoverable at the system
/// level; the affected call simply ends up without a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("summarization service unavailable: {0}")]
    Unavailable(String),

    #[error("summarization service rejected credentials: {0}")]
    Auth(String),

    #[error("malformed summarization response: {0}")]
    MalformedResponse(String),
}

/// Text-summarization service interface.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a short multi-sentence summary of a rendered transcript,
    /// bounded to at most `max_tokens` of output.
    async fn summarize(&self, transcript: &str, max_tokens: u32) -> Result<String, SummaryError>;
}
