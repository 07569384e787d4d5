//! Plain keyed message storage.
//!
//! Every write replaces a session's whole history; nothing here appends.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::types::{Message, Result};

/// Storage contract for per-session message histories.
///
/// Implementations must treat `update_messages` as a total replace of the
/// session's sequence. Reads and deletes of unknown sessions are not errors.
#[async_trait]
pub trait ChatMemoryStore: Send + Sync {
    /// Get the stored messages for a session (empty if absent)
    async fn get_messages(&self, session_id: &str) -> Result<Vec<Message>>;

    /// Replace the stored messages for a session
    async fn update_messages(&self, session_id: &str, messages: Vec<Message>) -> Result<()>;

    /// Remove a session
    async fn delete_messages(&self, session_id: &str) -> Result<()>;
}

/// In-process store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryChatMemoryStore {
    sessions: RwLock<HashMap<String, Vec<Message>>>,
}

impl InMemoryChatMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatMemoryStore for InMemoryChatMemoryStore {
    async fn get_messages(&self, session_id: &str) -> Result<Vec<Message>> {
        Ok(self
            .sessions
            .read()
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_messages(&self, session_id: &str, messages: Vec<Message>) -> Result<()> {
        self.sessions
            .write()
            .insert(session_id.to_string(), messages);
        Ok(())
    }

    async fn delete_messages(&self, session_id: &str) -> Result<()> {
        self.sessions.write().remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_session_is_empty() {
        let store = InMemoryChatMemoryStore::new();
        assert!(store.get_messages("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_whole_sequence() {
        let store = InMemoryChatMemoryStore::new();
        store
            .update_messages("s1", vec![Message::user("a"), Message::assistant("b")])
            .await
            .unwrap();
        store
            .update_messages("s1", vec![Message::user("c")])
            .await
            .unwrap();

        assert_eq!(
            store.get_messages("s1").await.unwrap(),
            vec![Message::user("c")]
        );
        assert_eq!(store.sessions.read().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_session() {
        let store = InMemoryChatMemoryStore::new();
        store
            .update_messages("s1", vec![Message::user("a")])
            .await
            .unwrap();
        store.delete_messages("s1").await.unwrap();
        store.delete_messages("never-existed").await.unwrap();

        assert!(store.get_messages("s1").await.unwrap().is_empty());
        assert!(store.sessions.read().is_empty());
    }
}
