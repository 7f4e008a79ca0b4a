use thiserror::Error;

/// Errors from history storage operations (used by trait definitions in
/// mercury-core).
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("invalid stored history: {0}")]
    Corrupt(String),
}

/// Errors from response generator operations.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors from delivery channel operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Failure modes of one `process_message` pass, split by severity: these
/// are the errors reported to the caller. Read-receipt and generation
/// failures are absorbed inside the actor and never appear here.
///
/// The display strings are part of the webhook response contract.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("Invalid webhook data")]
    InvalidEvent,

    #[error("Unsupported message type")]
    UnsupportedContent,

    #[error("Failed to send WhatsApp message")]
    DeliveryFailed(#[source] DeliveryError),

    #[error("history storage failed: {0}")]
    History(#[from] HistoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_error_display_contract() {
        assert_eq!(ConversationError::InvalidEvent.to_string(), "Invalid webhook data");
        assert_eq!(
            ConversationError::UnsupportedContent.to_string(),
            "Unsupported message type"
        );
        assert_eq!(
            ConversationError::DeliveryFailed(DeliveryError::Request("timeout".to_string()))
                .to_string(),
            "Failed to send WhatsApp message"
        );
    }

    #[test]
    fn test_history_error_display() {
        let err = HistoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_delivery_error_display() {
        let err = DeliveryError::Status {
            status: 401,
            body: "bad token".to_string(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("bad token"));
    }

    #[test]
    fn test_history_error_converts_into_conversation_error() {
        let err: ConversationError = HistoryError::Connection.into();
        assert!(err.to_string().contains("database connection error"));
    }
}
