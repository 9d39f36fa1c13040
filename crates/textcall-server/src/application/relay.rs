//! Relay Application Service (Use Case)
//!
//! Append-only message exchange within one session.

use std::sync::Arc;

use textcall::{DomainError, Message, MessageLog, SessionId, Subscription, Username};

/// Application service for in-session messaging
pub struct RelayService<M: MessageLog> {
    log: Arc<M>,
}

impl<M: MessageLog> RelayService<M> {
    pub fn new(log: Arc<M>) -> Self {
        Self { log }
    }

    /// Append a message to the session's log.
    ///
    /// Empty or whitespace-only text is dropped as a no-op (`Ok(None)`),
    /// not an error.
    pub async fn send(
        &self,
        session_id: &SessionId,
        sender: &Username,
        text: &str,
    ) -> Result<Option<Message>, DomainError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let message = self.log.append(session_id, sender, text).await?;
        Ok(Some(message))
    }

    /// Watch the session's ordered log: full current log immediately, full
    /// updated log on every append.
    pub async fn subscribe(
        &self,
        session_id: &SessionId,
    ) -> Result<Subscription<Vec<Message>>, DomainError> {
        self.log.watch(session_id).await
    }

    /// One-shot ordered read of the session's log.
    pub async fn history(&self, session_id: &SessionId) -> Result<Vec<Message>, DomainError> {
        self.log.history(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryMessageLog, MemoryStore};

    fn user(name: &str) -> Username {
        Username::parse(name).unwrap()
    }

    fn relay() -> RelayService<MemoryMessageLog> {
        RelayService::new(Arc::new(MemoryStore::new().message_log()))
    }

    fn session() -> SessionId {
        SessionId::for_pair(&user("alice"), &user("bob"))
    }

    #[tokio::test]
    async fn blank_text_is_a_no_op() {
        let relay = relay();
        let id = session();

        assert!(relay.send(&id, &user("alice"), "").await.unwrap().is_none());
        assert!(relay.send(&id, &user("alice"), "   \t").await.unwrap().is_none());
        assert!(relay.history(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sent_messages_arrive_in_order() {
        let relay = relay();
        let id = session();

        relay.send(&id, &user("alice"), "hey, ready?").await.unwrap();
        relay.send(&id, &user("bob"), "yes, this is cool").await.unwrap();

        let history = relay.history(&id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sender, user("alice"));
        assert_eq!(history[1].sender, user("bob"));
    }

    #[tokio::test]
    async fn subscribers_render_the_log_on_each_notification() {
        let relay = relay();
        let id = session();

        let mut sub = relay.subscribe(&id).await.unwrap();
        assert!(sub.next().await.unwrap().is_empty());

        relay.send(&id, &user("alice"), "hello").await.unwrap();
        let log = sub.next().await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].text, "hello");
    }
}
