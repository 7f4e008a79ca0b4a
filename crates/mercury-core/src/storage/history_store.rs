//! History store trait.
//!
//! Defines the interface for per-user conversation history persistence.
//! A user's history is one logical record: mutations load the full
//! history, modify it, and persist it back as a unit.
//! Uses RPITIT (native async fn in traits, Rust 2024 edition).

use mercury_types::error::HistoryError;
use mercury_types::message::ConversationHistory;
use mercury_types::user::UserKey;

/// Trait for durable per-user conversation history storage.
pub trait HistoryStore: Send + Sync {
    /// Load the history for a key. Returns an empty history if the key has
    /// never been written.
    fn load(
        &self,
        key: &UserKey,
    ) -> impl std::future::Future<Output = Result<ConversationHistory, HistoryError>> + Send;

    /// Persist the full history for a key (upsert).
    fn save(
        &self,
        key: &UserKey,
        history: &ConversationHistory,
    ) -> impl std::future::Future<Output = Result<(), HistoryError>> + Send;

    /// Delete the history for a key. No-op if the key does not exist.
    fn clear(
        &self,
        key: &UserKey,
    ) -> impl std::future::Future<Output = Result<(), HistoryError>> + Send;
}
