//! SQLite history store implementation.
//!
//! Implements `HistoryStore` from `mercury-core` using sqlx with split
//! read/write pools. Each user's history is one row; the message log is
//! stored as a JSON array and deserialized on read, so every mutation is
//! a whole-record load-then-save.

use chrono::Utc;
use sqlx::Row;

use mercury_core::storage::history_store::HistoryStore;
use mercury_types::error::HistoryError;
use mercury_types::message::ConversationHistory;
use mercury_types::user::UserKey;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `HistoryStore`.
pub struct SqliteHistoryStore {
    pool: DatabasePool,
}

impl SqliteHistoryStore {
    /// Create a new history store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl HistoryStore for SqliteHistoryStore {
    async fn load(&self, key: &UserKey) -> Result<ConversationHistory, HistoryError> {
        let row = sqlx::query("SELECT messages FROM conversation_history WHERE user_key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| HistoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let raw: String = row
                    .try_get("messages")
                    .map_err(|e| HistoryError::Query(e.to_string()))?;
                serde_json::from_str(&raw).map_err(|e| HistoryError::Corrupt(e.to_string()))
            }
            None => Ok(ConversationHistory::new()),
        }
    }

    async fn save(&self, key: &UserKey, history: &ConversationHistory) -> Result<(), HistoryError> {
        let now = Utc::now().to_rfc3339();
        let raw = serde_json::to_string(history)
            .map_err(|e| HistoryError::Query(format!("failed to serialize history: {e}")))?;

        sqlx::query(
            r#"INSERT INTO conversation_history (user_key, messages, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (user_key) DO UPDATE SET messages = excluded.messages, updated_at = excluded.updated_at"#,
        )
        .bind(key.as_str())
        .bind(&raw)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| HistoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self, key: &UserKey) -> Result<(), HistoryError> {
        sqlx::query("DELETE FROM conversation_history WHERE user_key = ?")
            .bind(key.as_str())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| HistoryError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mercury_types::message::Message;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn key(id: &str) -> UserKey {
        UserKey::from_contact(id).unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_returns_empty() {
        let store = SqliteHistoryStore::new(test_pool().await);
        let history = store.load(&key("15551234567")).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let store = SqliteHistoryStore::new(test_pool().await);
        let k = key("15551234567");

        let mut history = ConversationHistory::new();
        history.push(Message::user("Hello", Utc::now()));
        history.push(Message::assistant("Hi! How can I help?", Utc::now()));
        store.save(&k, &history).await.unwrap();

        let loaded = store.load(&k).await.unwrap();
        assert_eq!(loaded, history);
    }

    #[tokio::test]
    async fn test_save_upserts() {
        let store = SqliteHistoryStore::new(test_pool().await);
        let k = key("15551234567");

        let mut history = ConversationHistory::new();
        history.push(Message::user("first", Utc::now()));
        store.save(&k, &history).await.unwrap();

        history.push(Message::assistant("second", Utc::now()));
        store.save(&k, &history).await.unwrap();

        let loaded = store.load(&k).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.messages()[1].content, "second");
    }

    #[tokio::test]
    async fn test_bounded_history_survives_persistence() {
        let store = SqliteHistoryStore::new(test_pool().await);
        let k = key("15551234567");

        let mut history = ConversationHistory::new();
        for n in 0..30 {
            history.push(Message::user(format!("message {n}"), Utc::now()));
            store.save(&k, &history).await.unwrap();
            history = store.load(&k).await.unwrap();
        }

        assert_eq!(history.len(), ConversationHistory::MAX_MESSAGES);
        assert_eq!(history.messages()[0].content, "message 10");
        assert_eq!(history.messages()[19].content, "message 29");
    }

    #[tokio::test]
    async fn test_clear_then_load_is_empty() {
        let store = SqliteHistoryStore::new(test_pool().await);
        let k = key("15551234567");

        let mut history = ConversationHistory::new();
        history.push(Message::user("Hello", Utc::now()));
        store.save(&k, &history).await.unwrap();

        store.clear(&k).await.unwrap();
        assert!(store.load(&k).await.unwrap().is_empty());

        // Clearing again is a no-op.
        store.clear(&k).await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let store = SqliteHistoryStore::new(test_pool().await);
        let a = key("15551111111");
        let b = key("15552222222");

        let mut history = ConversationHistory::new();
        history.push(Message::user("only for a", Utc::now()));
        store.save(&a, &history).await.unwrap();

        assert_eq!(store.load(&a).await.unwrap().len(), 1);
        assert!(store.load(&b).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_row_reports_corrupt() {
        let pool = test_pool().await;
        let store = SqliteHistoryStore::new(pool.clone());
        let k = key("15551234567");

        sqlx::query(
            "INSERT INTO conversation_history (user_key, messages, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(k.as_str())
        .bind("not json")
        .bind(Utc::now().to_rfc3339())
        .bind(Utc::now().to_rfc3339())
        .execute(&pool.writer)
        .await
        .unwrap();

        let err = store.load(&k).await.unwrap_err();
        assert!(matches!(err, HistoryError::Corrupt(_)));
    }
}
