//! DeliveryChannel trait definition.
//!
//! Two operations with different failure severities: `send_text` failures
//! are hard failures surfaced to the caller, `mark_read` failures are
//! logged by the caller and never abort processing.
//!
//! Uses RPITIT (native async fn in traits, Rust 2024 edition).
//! Implementations live in mercury-infra (e.g., `WhatsAppClient`).

use mercury_types::error::DeliveryError;
use mercury_types::user::UserKey;

/// Trait for the messaging-provider delivery backend.
pub trait DeliveryChannel: Send + Sync {
    /// Send a text message to a user.
    fn send_text(
        &self,
        to: &UserKey,
        body: &str,
    ) -> impl std::future::Future<Output = Result<(), DeliveryError>> + Send;

    /// Mark an inbound message as read, optionally showing a typing
    /// indicator while the reply is being produced.
    fn mark_read(
        &self,
        message_id: &str,
        typing: bool,
    ) -> impl std::future::Future<Output = Result<(), DeliveryError>> + Send;
}
