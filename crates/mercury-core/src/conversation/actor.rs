//! Per-user conversation actor.
//!
//! One actor instance exists per `UserKey` and is the only writer of that
//! user's history. A single `process_message` pass either runs to
//! completion or halts at a defined point:
//!
//! - validation failure and non-text content halt before any history
//!   mutation;
//! - the read receipt is best-effort and never aborts processing;
//! - the inbound user message is persisted before generation, so a failed
//!   reply still leaves what the user said on record;
//! - generation failures are absorbed into a fixed fallback reply;
//! - delivery failures are surfaced after both messages are committed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use mercury_types::error::{ConversationError, HistoryError};
use mercury_types::message::Message;
use mercury_types::outcome::ProcessOutcome;
use mercury_types::user::UserKey;
use mercury_types::webhook::InboundEvent;

use crate::delivery::channel::DeliveryChannel;
use crate::llm::generator::ResponseGenerator;
use crate::storage::history_store::HistoryStore;

/// Notice sent to the user when the inbound message is not plain text.
pub const UNSUPPORTED_CONTENT_NOTICE: &str =
    "Sorry, I can only read text messages right now. Please send your message as text.";

/// Reply substituted when the generator call fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble coming up with a reply right now. Please try again in a moment.";

/// The single-writer processing unit for one user's conversation.
///
/// The actor itself is stateless logic over persisted data; per-key
/// serialization is enforced by the dispatcher's lane lock.
pub struct ConversationActor<H, G, D> {
    key: UserKey,
    store: Arc<H>,
    generator: Arc<G>,
    delivery: Arc<D>,
    system_prompt: Arc<str>,
}

impl<H, G, D> ConversationActor<H, G, D>
where
    H: HistoryStore,
    G: ResponseGenerator,
    D: DeliveryChannel,
{
    pub fn new(
        key: UserKey,
        store: Arc<H>,
        generator: Arc<G>,
        delivery: Arc<D>,
        system_prompt: Arc<str>,
    ) -> Self {
        Self {
            key,
            store,
            generator,
            delivery,
            system_prompt,
        }
    }

    pub fn key(&self) -> &UserKey {
        &self.key
    }

    /// Process one inbound message to completion.
    ///
    /// Never panics and never returns a transport-level error: every
    /// failure path maps to a structured [`ProcessOutcome`].
    pub async fn process_message(&self, event: &InboundEvent) -> ProcessOutcome {
        match self.run(event).await {
            Ok(reply) => ProcessOutcome::succeeded(reply),
            Err(err) => {
                warn!(user = %self.key, error = %err, "message processing failed");
                ProcessOutcome::failed(err.to_string())
            }
        }
    }

    async fn run(&self, event: &InboundEvent) -> Result<String, ConversationError> {
        if event.contact.trim().is_empty() || event.message_id.trim().is_empty() {
            return Err(ConversationError::InvalidEvent);
        }

        // Best-effort: a failed receipt must never abort processing.
        if let Err(err) = self.delivery.mark_read(&event.message_id, true).await {
            warn!(user = %self.key, error = %err, "read receipt failed");
        }

        let text = match event.text.as_deref() {
            Some(body) if event.message_type == "text" && !body.trim().is_empty() => {
                body.to_string()
            }
            _ => {
                if let Err(err) = self
                    .delivery
                    .send_text(&self.key, UNSUPPORTED_CONTENT_NOTICE)
                    .await
                {
                    warn!(user = %self.key, error = %err, "failed to send unsupported-content notice");
                }
                return Err(ConversationError::UnsupportedContent);
            }
        };

        let mut history = self.store.load(&self.key).await?;
        history.push(Message::user(text, event.timestamp));
        self.store.save(&self.key, &history).await?;

        let reply = match self
            .generator
            .generate(&self.system_prompt, history.messages())
            .await
        {
            Ok(text) => text,
            Err(err) => {
                warn!(user = %self.key, error = %err, "generation failed, substituting fallback reply");
                FALLBACK_REPLY.to_string()
            }
        };

        history.push(Message::assistant(reply.clone(), Utc::now()));
        self.store.save(&self.key, &history).await?;

        self.delivery
            .send_text(&self.key, &reply)
            .await
            .map_err(ConversationError::DeliveryFailed)?;

        debug!(user = %self.key, history_len = history.len(), "reply delivered");
        Ok(reply)
    }

    /// Delete all persisted history for this user. Idempotent.
    pub async fn clear_history(&self) -> Result<(), HistoryError> {
        self.store.clear(&self.key).await
    }
}
