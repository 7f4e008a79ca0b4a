//! WhatsApp Cloud API outbound request shapes.
//!
//! Both requests go to the same Graph API endpoint
//! (`POST /{phone_number_id}/messages`): one sends a text message, the
//! other marks an inbound message as read, optionally with a typing
//! indicator shown while the reply is produced.

use serde::Serialize;

/// Text-send request body.
#[derive(Debug, Clone, Serialize)]
pub struct TextSendRequest {
    pub messaging_product: String,
    pub to: String,
    #[serde(rename = "type")]
    pub message_type: String,
    pub text: TextContent,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextContent {
    pub body: String,
}

impl TextSendRequest {
    pub fn new(to: &str, body: &str) -> Self {
        Self {
            messaging_product: "whatsapp".to_string(),
            to: to.to_string(),
            message_type: "text".to_string(),
            text: TextContent {
                body: body.to_string(),
            },
        }
    }
}

/// Read-receipt request body.
#[derive(Debug, Clone, Serialize)]
pub struct ReadReceiptRequest {
    pub messaging_product: String,
    pub status: String,
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typing_indicator: Option<TypingIndicator>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypingIndicator {
    #[serde(rename = "type")]
    pub indicator_type: String,
}

impl ReadReceiptRequest {
    pub fn new(message_id: &str, typing: bool) -> Self {
        Self {
            messaging_product: "whatsapp".to_string(),
            status: "read".to_string(),
            message_id: message_id.to_string(),
            typing_indicator: typing.then(|| TypingIndicator {
                indicator_type: "text".to_string(),
            }),
        }
    }
}
