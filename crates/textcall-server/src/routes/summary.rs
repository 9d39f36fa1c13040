//! Summary Routes - Thin forwarding facade over the summarizer
//!
//! HTTP rendition of the summarization collaborator for clients that hold
//! their own transcript. The body is validated by hand so a missing or
//! non-list `messages` field maps to 400 rather than a generic
//! deserialization rejection.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;

use crate::models::{SummaryRequest, SummaryResponse, TranscriptLine};
use crate::AppState;

/// Output bound for facade-driven summaries.
const MAX_SUMMARY_TOKENS: u32 = 100;

/// Summarize a transcript
#[utoipa::path(
    post,
    path = "/summary",
    request_body = SummaryRequest,
    responses(
        (status = 200, description = "Summary generated", body = SummaryResponse),
        (status = 400, description = "messages missing or not a list"),
        (status = 500, description = "Summarizer not configured or upstream failure")
    ),
    tag = "Summary"
)]
pub async fn generate_summary(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<SummaryResponse>, (StatusCode, String)> {
    let lines = parse_messages(&body).ok_or((
        StatusCode::BAD_REQUEST,
        "messages must be a list of {sender, text} objects".to_string(),
    ))?;

    let summarizer = state.summarizer.as_ref().ok_or((
        StatusCode::INTERNAL_SERVER_ERROR,
        "summarization API key not set".to_string(),
    ))?;

    let transcript = lines
        .iter()
        .map(|line| format!("{}: {}", line.sender, line.text))
        .collect::<Vec<_>>()
        .join("\n");

    let summary = summarizer
        .summarize(&transcript, MAX_SUMMARY_TOKENS)
        .await
        .map_err(|e| {
            tracing::warn!("Facade summarization failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    Ok(Json(SummaryResponse { summary }))
}

fn parse_messages(body: &Value) -> Option<Vec<TranscriptLine>> {
    let messages = body.get("messages")?;
    if !messages.is_array() {
        return None;
    }
    serde_json::from_value(messages.clone()).ok()
}

pub fn router() -> Router<AppState> {
    Router::new().route("/summary", post(generate_summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::adapters::memory::MemoryStore;
    use crate::application::{IdentityService, RelayService, SignalingService};
    use textcall::{Summarizer, SummaryError};

    /// Answers with the transcript it was handed, for assertion.
    struct EchoSummarizer;

    #[async_trait]
    impl Summarizer for EchoSummarizer {
        async fn summarize(
            &self,
            transcript: &str,
            _max_tokens: u32,
        ) -> Result<String, SummaryError> {
            Ok(format!("summary of: {}", transcript))
        }
    }

    fn state_with(summarizer: Option<Arc<dyn Summarizer>>) -> AppState {
        let store = MemoryStore::new();
        AppState {
            identity: Arc::new(IdentityService::new(Arc::new(store.user_directory()))),
            signaling: Arc::new(SignalingService::new(
                Arc::new(store.call_store()),
                Arc::new(store.user_directory()),
            )),
            relay: Arc::new(RelayService::new(Arc::new(store.message_log()))),
            summarizer,
        }
    }

    #[tokio::test]
    async fn missing_messages_is_a_bad_request() {
        let state = state_with(Some(Arc::new(EchoSummarizer)));

        let err = generate_summary(State(state), Json(json!({})))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_list_messages_is_a_bad_request() {
        let state = state_with(Some(Arc::new(EchoSummarizer)));

        let err = generate_summary(State(state), Json(json!({"messages": "hello"})))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unconfigured_summarizer_is_a_server_error() {
        let state = state_with(None);
        let body = json!({"messages": [{"sender": "alice", "text": "hi"}]});

        let err = generate_summary(State(state), Json(body)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn forwards_the_rendered_transcript() {
        let state = state_with(Some(Arc::new(EchoSummarizer)));
        let body = json!({"messages": [
            {"sender": "alice", "text": "hey, ready?"},
            {"sender": "bob", "text": "yes"}
        ]});

        let Json(response) = generate_summary(State(state), Json(body)).await.unwrap();
        assert_eq!(response.summary, "summary of: alice: hey, ready?\nbob: yes");
    }
}
