//! In-memory history store.
//!
//! Backs tests and local development runs where durability is not needed.
//! Same contract as the SQLite implementation in mercury-infra.

use dashmap::DashMap;

use mercury_types::error::HistoryError;
use mercury_types::message::ConversationHistory;
use mercury_types::user::UserKey;

use crate::storage::history_store::HistoryStore;

/// Non-durable `HistoryStore` keeping each user's record in a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    records: DashMap<UserKey, ConversationHistory>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    async fn load(&self, key: &UserKey) -> Result<ConversationHistory, HistoryError> {
        Ok(self
            .records
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn save(&self, key: &UserKey, history: &ConversationHistory) -> Result<(), HistoryError> {
        self.records.insert(key.clone(), history.clone());
        Ok(())
    }

    async fn clear(&self, key: &UserKey) -> Result<(), HistoryError> {
        self.records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mercury_types::message::Message;

    fn key(id: &str) -> UserKey {
        UserKey::from_contact(id).unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_returns_empty() {
        let store = InMemoryHistoryStore::new();
        let history = store.load(&key("15551234567")).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let store = InMemoryHistoryStore::new();
        let k = key("15551234567");

        let mut history = ConversationHistory::new();
        history.push(Message::user("hello", Utc::now()));
        store.save(&k, &history).await.unwrap();

        let loaded = store.load(&k).await.unwrap();
        assert_eq!(loaded, history);
    }

    #[tokio::test]
    async fn test_clear_then_load_is_empty() {
        let store = InMemoryHistoryStore::new();
        let k = key("15551234567");

        let mut history = ConversationHistory::new();
        history.push(Message::user("hello", Utc::now()));
        store.save(&k, &history).await.unwrap();

        store.clear(&k).await.unwrap();
        assert!(store.load(&k).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_missing_is_noop() {
        let store = InMemoryHistoryStore::new();
        store.clear(&key("nobody")).await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let store = InMemoryHistoryStore::new();
        let a = key("15551111111");
        let b = key("15552222222");

        let mut history = ConversationHistory::new();
        history.push(Message::user("only for a", Utc::now()));
        store.save(&a, &history).await.unwrap();

        assert_eq!(store.load(&a).await.unwrap().len(), 1);
        assert!(store.load(&b).await.unwrap().is_empty());
    }
}
