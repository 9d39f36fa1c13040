//! Summary Worker - Edge-triggered transcript summarization
//!
//! Watches the call store's transition feed and, on each transition *into*
//! `ended` from a non-ended prior state, gathers the session transcript
//! and asks the summarization collaborator for a short summary, merging
//! the result back onto the call record. Runs as a spawned task decoupled
//! from any client session — both parties may be long gone by the time a
//! summary lands.

use std::sync::Arc;

use textcall::{
    render_transcript, Call, CallStatus, CallStore, CallTransition, DomainError, MessageLog,
    Summarizer,
};

/// Worker configuration
#[derive(Debug, Clone)]
pub struct SummaryWorkerConfig {
    /// Output bound passed to the summarization collaborator.
    pub max_summary_tokens: u32,
}

impl Default for SummaryWorkerConfig {
    fn default() -> Self {
        Self {
            max_summary_tokens: 150,
        }
    }
}

/// Edge-triggered summary pipeline
pub struct SummaryWorker<C: CallStore, M: MessageLog> {
    calls: Arc<C>,
    messages: Arc<M>,
    summarizer: Arc<dyn Summarizer>,
    config: SummaryWorkerConfig,
}

impl<C, M> SummaryWorker<C, M>
where
    C: CallStore + 'static,
    M: MessageLog + 'static,
{
    pub fn new(
        calls: Arc<C>,
        messages: Arc<M>,
        summarizer: Arc<dyn Summarizer>,
        config: Option<SummaryWorkerConfig>,
    ) -> Self {
        Self {
            calls,
            messages,
            summarizer,
            config: config.unwrap_or_default(),
        }
    }

    /// Subscribe to the transition feed, then run in the background.
    ///
    /// The subscription is established before this returns, so no
    /// transition written afterwards can be missed.
    pub async fn start(self) -> Result<tokio::task::JoinHandle<()>, DomainError> {
        let transitions = self.calls.watch_transitions().await?;
        tracing::info!("Summary pipeline watching call transitions");

        Ok(tokio::spawn(async move {
            self.run(transitions).await;
        }))
    }

    async fn run(self, mut transitions: textcall::Subscription<CallTransition>) {
        while let Some(change) = transitions.next().await {
            if !ended_edge(&change) {
                continue;
            }
            self.summarize_call(change.after).await;
        }

        tracing::info!("Call transition feed closed, summary pipeline stopping");
    }

    /// One summarization attempt for a freshly ended call. Failures are
    /// terminal for this attempt only and never touch the call's
    /// lifecycle fields.
    async fn summarize_call(&self, call: Call) {
        let session_id = call.session_id;

        if call.summary.is_some() {
            tracing::debug!("Call {} already carries a summary, skipping", session_id);
            return;
        }

        let log = match self.messages.history(&session_id).await {
            Ok(log) => log,
            Err(e) => {
                tracing::warn!("Could not read transcript for {}: {}", session_id, e);
                return;
            }
        };

        if log.is_empty() {
            tracing::debug!("No messages in {}, skipping summary", session_id);
            return;
        }

        let transcript = render_transcript(&log);
        match self
            .summarizer
            .summarize(&transcript, self.config.max_summary_tokens)
            .await
        {
            Ok(summary) => match self.calls.merge_summary(&session_id, &summary).await {
                Ok(true) => tracing::info!("Summary saved for call {}", session_id),
                Ok(false) => {
                    tracing::debug!("Call {} was summarized concurrently, keeping the first", session_id)
                }
                Err(e) => tracing::warn!("Failed to save summary for {}: {}", session_id, e),
            },
            Err(e) => tracing::warn!("Summary generation failed for {}: {}", session_id, e),
        }
    }
}

/// Fire only on the transition *into* `ended` from a non-ended prior
/// state. Re-observing an already-ended record never fires.
fn ended_edge(change: &CallTransition) -> bool {
    change.after.status == CallStatus::Ended
        && change
            .before
            .as_ref()
            .is_some_and(|before| before.status != CallStatus::Ended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::adapters::memory::{
        MemoryCallStore, MemoryMessageLog, MemoryStore, MemoryUserDirectory,
    };
    use crate::application::{RelayService, SignalingService};
    use textcall::{SessionId, SummaryError, UserDirectory, Username};

    enum Outcome {
        Succeed(&'static str),
        AuthFailure,
    }

    /// Captures every invocation, then answers with a fixed outcome.
    struct RecordingSummarizer {
        invocations: AtomicUsize,
        transcripts: Mutex<Vec<String>>,
        outcome: Outcome,
    }

    impl RecordingSummarizer {
        fn new(outcome: Outcome) -> Self {
            Self {
                invocations: AtomicUsize::new(0),
                transcripts: Mutex::new(Vec::new()),
                outcome,
            }
        }

        fn invocations(&self) -> usize {
            self.invocations.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Summarizer for RecordingSummarizer {
        async fn summarize(
            &self,
            transcript: &str,
            _max_tokens: u32,
        ) -> Result<String, SummaryError> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            self.transcripts.lock().push(transcript.to_string());
            match self.outcome {
                Outcome::Succeed(summary) => Ok(summary.to_string()),
                Outcome::AuthFailure => Err(SummaryError::Auth("invalid api key".to_string())),
            }
        }
    }

    struct Harness {
        store: MemoryStore,
        signaling: SignalingService<MemoryCallStore, MemoryUserDirectory>,
        relay: RelayService<MemoryMessageLog>,
        summarizer: Arc<RecordingSummarizer>,
    }

    async fn harness(outcome: Outcome) -> Harness {
        let store = MemoryStore::new();
        let directory = store.user_directory();
        directory
            .claim_username("acc-alice", &user("alice"))
            .await
            .unwrap();
        directory
            .claim_username("acc-bob", &user("bob"))
            .await
            .unwrap();

        let summarizer = Arc::new(RecordingSummarizer::new(outcome));
        let worker = SummaryWorker::new(
            Arc::new(store.call_store()),
            Arc::new(store.message_log()),
            summarizer.clone(),
            None,
        );
        worker.start().await.unwrap();

        Harness {
            signaling: SignalingService::new(
                Arc::new(store.call_store()),
                Arc::new(store.user_directory()),
            ),
            relay: RelayService::new(Arc::new(store.message_log())),
            summarizer,
            store,
        }
    }

    fn user(name: &str) -> Username {
        Username::parse(name).unwrap()
    }

    async fn wait_for_summary(store: &MemoryStore, id: &SessionId) {
        for _ in 0..200 {
            let call = store.call_store().find(id).await.unwrap();
            if call.and_then(|c| c.summary).is_some() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("summary not written within 1s");
    }

    async fn wait_for_invocations(summarizer: &RecordingSummarizer, expected: usize) {
        for _ in 0..200 {
            if summarizer.invocations() >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("summarizer not invoked within 1s");
    }

    /// Let the worker drain anything still queued on its feed.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    async fn call_of(store: &MemoryStore, id: &SessionId) -> Call {
        store.call_store().find(id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn full_call_gets_summarized_exactly_once() {
        let h = harness(Outcome::Succeed("They synced on the project.")).await;
        let (alice, bob) = (user("alice"), user("bob"));

        let id = h.signaling.initiate(&alice, &bob).await.unwrap();
        h.signaling.accept(&id).await.unwrap();
        h.relay.send(&id, &alice, "hey, ready?").await.unwrap();
        h.relay.send(&id, &bob, "yes, this is cool").await.unwrap();
        h.signaling.hangup(&id).await.unwrap();

        wait_for_summary(&h.store, &id).await;

        let call = call_of(&h.store, &id).await;
        assert_eq!(call.summary.as_deref(), Some("They synced on the project."));
        assert_eq!(call.status, CallStatus::Ended);

        assert_eq!(h.summarizer.invocations(), 1);
        let transcripts = h.summarizer.transcripts.lock();
        assert_eq!(
            transcripts[0],
            "alice: hey, ready?\nbob: yes, this is cool"
        );
    }

    #[tokio::test]
    async fn redelivered_ended_state_never_refires() {
        let h = harness(Outcome::Succeed("Short call.")).await;
        let (alice, bob) = (user("alice"), user("bob"));

        let id = h.signaling.initiate(&alice, &bob).await.unwrap();
        h.signaling.accept(&id).await.unwrap();
        h.relay.send(&id, &alice, "quick one").await.unwrap();
        h.signaling.hangup(&id).await.unwrap();

        wait_for_summary(&h.store, &id).await;

        // Re-deliver the terminal state: an ended -> ended write is not an
        // edge, so the pipeline must stay quiet.
        let ended = call_of(&h.store, &id).await;
        h.store.call_store().put(&ended).await.unwrap();
        settle().await;

        assert_eq!(h.summarizer.invocations(), 1);
    }

    #[tokio::test]
    async fn empty_transcript_skips_the_collaborator() {
        let h = harness(Outcome::Succeed("unused")).await;
        let (alice, bob) = (user("alice"), user("bob"));

        let id = h.signaling.initiate(&alice, &bob).await.unwrap();
        h.signaling.reject(&id).await.unwrap();
        settle().await;

        assert_eq!(h.summarizer.invocations(), 0);
        assert!(call_of(&h.store, &id).await.summary.is_none());
    }

    #[tokio::test]
    async fn collaborator_auth_failure_degrades_to_no_summary() {
        let h = harness(Outcome::AuthFailure).await;
        let (alice, bob) = (user("alice"), user("bob"));

        let id = h.signaling.initiate(&alice, &bob).await.unwrap();
        h.signaling.accept(&id).await.unwrap();
        h.relay.send(&id, &alice, "can you hear me?").await.unwrap();
        h.signaling.hangup(&id).await.unwrap();

        wait_for_invocations(&h.summarizer, 1).await;
        settle().await;

        // The lifecycle is untouched and nothing retries.
        let call = call_of(&h.store, &id).await;
        assert_eq!(call.status, CallStatus::Ended);
        assert!(call.summary.is_none());
        assert_eq!(h.summarizer.invocations(), 1);
    }

    #[tokio::test]
    async fn existing_summary_is_never_overwritten() {
        let h = harness(Outcome::Succeed("fresh")).await;
        let (alice, bob) = (user("alice"), user("bob"));

        let id = h.signaling.initiate(&alice, &bob).await.unwrap();
        h.signaling.accept(&id).await.unwrap();
        h.relay.send(&id, &alice, "hello").await.unwrap();

        // A summary landed through some other path before the edge fired.
        let mut call = call_of(&h.store, &id).await;
        call.hang_up().unwrap();
        call.summary = Some("already here".to_string());
        h.store.call_store().put(&call).await.unwrap();
        settle().await;

        assert_eq!(h.summarizer.invocations(), 0);
        assert_eq!(
            call_of(&h.store, &id).await.summary.as_deref(),
            Some("already here")
        );
    }

    #[test]
    fn edge_detection_requires_a_non_ended_before() {
        let mut call = Call::ring(user("alice"), user("bob"));
        let ringing = call.clone();
        call.accept().unwrap();
        let active = call.clone();
        call.hang_up().unwrap();
        let ended = call;

        assert!(ended_edge(&CallTransition {
            before: Some(active.clone()),
            after: ended.clone(),
        }));
        assert!(ended_edge(&CallTransition {
            before: Some(ringing.clone()),
            after: ended.clone(),
        }));
        assert!(!ended_edge(&CallTransition {
            before: Some(ended.clone()),
            after: ended.clone(),
        }));
        assert!(!ended_edge(&CallTransition {
            before: None,
            after: ended,
        }));
        assert!(!ended_edge(&CallTransition {
            before: Some(ringing),
            after: active,
        }));
    }
}
