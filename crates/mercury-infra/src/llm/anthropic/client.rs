//! AnthropicGenerator -- concrete [`ResponseGenerator`] implementation for
//! the Anthropic Messages API (`/v1/messages`), non-streaming.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use mercury_core::llm::generator::ResponseGenerator;
use mercury_types::error::GeneratorError;
use mercury_types::message::Message;

use super::types::{AnthropicMessage, AnthropicRequest, AnthropicResponse};

/// Anthropic Claude generator backend.
///
/// The conversation roles map straight through (history holds only user
/// and assistant messages); the system instruction travels in the
/// request's dedicated `system` field.
pub struct AnthropicGenerator {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicGenerator {
    /// The Anthropic API version header value.
    const API_VERSION: &'static str = "2023-06-01";

    /// Create a new Anthropic generator.
    pub fn new(api_key: SecretString, model: String, max_tokens: u32) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://api.anthropic.com".to_string(),
            model,
            max_tokens,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_request(&self, system: &str, messages: &[Message]) -> AnthropicRequest {
        let messages = messages
            .iter()
            .map(|m| AnthropicMessage {
                role: m.role.to_string(),
                content: m.content.clone(),
            })
            .collect();

        AnthropicRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages,
            system: (!system.is_empty()).then(|| system.to_string()),
        }
    }
}

impl ResponseGenerator for AnthropicGenerator {
    async fn generate(&self, system: &str, messages: &[Message]) -> Result<String, GeneratorError> {
        let body = self.to_request(system, messages);
        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GeneratorError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                400 => GeneratorError::InvalidRequest(error_body),
                401 => GeneratorError::AuthenticationFailed,
                429 => GeneratorError::RateLimited {
                    retry_after_ms: None,
                },
                529 => GeneratorError::Overloaded(error_body),
                _ => GeneratorError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Deserialization(format!("failed to parse response: {e}")))?;

        let text: String = parsed
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(GeneratorError::Deserialization(
                "response contained no text content".to_string(),
            ));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn generator() -> AnthropicGenerator {
        AnthropicGenerator::new(
            SecretString::from("sk-test"),
            "claude-sonnet-4-20250514".to_string(),
            1024,
        )
    }

    #[test]
    fn test_to_request_maps_roles_and_system() {
        let messages = vec![
            Message::user("Hello", Utc::now()),
            Message::assistant("Hi!", Utc::now()),
        ];
        let request = generator().to_request("Be helpful.", &messages);

        assert_eq!(request.model, "claude-sonnet-4-20250514");
        assert_eq!(request.max_tokens, 1024);
        assert_eq!(request.system.as_deref(), Some("Be helpful."));
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.messages[0].content, "Hello");
        assert_eq!(request.messages[1].role, "assistant");
    }

    #[test]
    fn test_to_request_omits_empty_system() {
        let messages = vec![Message::user("Hello", Utc::now())];
        let request = generator().to_request("", &messages);
        assert!(request.system.is_none());
    }
}
