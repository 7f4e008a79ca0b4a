//! ResponseGenerator trait definition.
//!
//! The stateless text-generation port: a system instruction plus the full
//! ordered conversation goes in, generated text comes out. The actor
//! absorbs every failure from this call, so implementations report errors
//! faithfully rather than substituting fallbacks themselves.
//!
//! Uses RPITIT (native async fn in traits, Rust 2024 edition).
//! Implementations live in mercury-infra (e.g., `AnthropicGenerator`).

use mercury_types::error::GeneratorError;
use mercury_types::message::Message;

/// Trait for LLM text-generation backends.
pub trait ResponseGenerator: Send + Sync {
    /// Generate a reply from the system instruction and the ordered
    /// conversation, oldest message first.
    fn generate(
        &self,
        system: &str,
        messages: &[Message],
    ) -> impl std::future::Future<Output = Result<String, GeneratorError>> + Send;
}
