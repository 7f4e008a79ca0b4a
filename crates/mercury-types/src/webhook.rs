//! WhatsApp Cloud API webhook payload shapes.
//!
//! Every field defaults so that the status/delivery notifications the
//! provider also posts to the same endpoint deserialize cleanly; the
//! dispatcher decides afterwards whether a payload is a message event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level webhook payload: `{ "entry": [ { "changes": [ ... ] } ] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookChange {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: ChangeValue,
}

/// The interesting part of a change: contacts and messages are present for
/// message events, absent for status events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub contacts: Vec<WebhookContact>,
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ChangeMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeMetadata {
    #[serde(default)]
    pub phone_number_id: String,
    #[serde(default)]
    pub display_phone_number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookContact {
    #[serde(default)]
    pub wa_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ContactProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactProfile {
    #[serde(default)]
    pub name: String,
}

/// One inbound message as the provider delivers it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub id: String,
    /// Epoch seconds as a decimal string.
    #[serde(default)]
    pub timestamp: String,
    #[serde(rename = "type", default)]
    pub message_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub body: String,
}

impl InboundMessage {
    /// The text body, if this is a text message with one.
    pub fn text_body(&self) -> Option<&str> {
        self.text.as_ref().map(|t| t.body.as_str())
    }

    /// The provider-supplied send time, if the timestamp parses.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        let secs: i64 = self.timestamp.parse().ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

/// A message event after dispatcher-level extraction. Transient: built
/// from the first contact and first message of a valid payload, consumed
/// by the conversation actor, never persisted.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// Provider contact id (`wa_id`). Empty means missing.
    pub contact: String,
    /// Display name from the contact profile, when present.
    pub contact_name: Option<String>,
    /// Provider message id. Empty means missing.
    pub message_id: String,
    pub message_type: String,
    pub text: Option<String>,
    pub timestamp: DateTime<Utc>,
}
