//! WhatsAppClient -- concrete [`DeliveryChannel`] implementation for the
//! WhatsApp Cloud API (Graph API).
//!
//! The access token is wrapped in [`secrecy::SecretString`] and only
//! exposed when constructing the Authorization header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use mercury_core::delivery::channel::DeliveryChannel;
use mercury_types::error::DeliveryError;
use mercury_types::user::UserKey;

use super::types::{ReadReceiptRequest, TextSendRequest};

/// WhatsApp Cloud API delivery backend.
pub struct WhatsAppClient {
    client: reqwest::Client,
    access_token: SecretString,
    phone_number_id: String,
    base_url: String,
}

impl WhatsAppClient {
    /// Create a new client sending through the given business phone number.
    pub fn new(access_token: SecretString, phone_number_id: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            access_token,
            phone_number_id,
            base_url: "https://graph.facebook.com/v20.0".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.base_url, self.phone_number_id)
    }

    async fn post<T: Serialize>(&self, body: &T) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(self.messages_url())
            .bearer_auth(self.access_token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| DeliveryError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

impl DeliveryChannel for WhatsAppClient {
    async fn send_text(&self, to: &UserKey, body: &str) -> Result<(), DeliveryError> {
        self.post(&TextSendRequest::new(to.as_str(), body)).await
    }

    async fn mark_read(&self, message_id: &str, typing: bool) -> Result<(), DeliveryError> {
        self.post(&ReadReceiptRequest::new(message_id, typing)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_url_includes_phone_number_id() {
        let client = WhatsAppClient::new(SecretString::from("token"), "1066".to_string())
            .with_base_url("https://graph.example.test/v20.0".to_string());
        assert_eq!(
            client.messages_url(),
            "https://graph.example.test/v20.0/1066/messages"
        );
    }
}
