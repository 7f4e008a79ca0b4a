//! Webhook payload routing.
//!
//! The dispatcher extracts the contact and message from an inbound
//! payload, derives the user key, and forwards the event to that user's
//! actor -- creating the actor on first contact. Each actor sits behind a
//! per-key async mutex, so one user's messages are processed strictly one
//! at a time while distinct users proceed in parallel.
//!
//! The dispatcher itself never touches history or calls the generator or
//! delivery backends.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use mercury_types::error::HistoryError;
use mercury_types::outcome::ProcessOutcome;
use mercury_types::user::UserKey;
use mercury_types::webhook::{InboundEvent, WebhookPayload};

use crate::conversation::actor::ConversationActor;
use crate::delivery::channel::DeliveryChannel;
use crate::llm::generator::ResponseGenerator;
use crate::storage::history_store::HistoryStore;

/// What the dispatcher did with a payload.
#[derive(Debug)]
pub enum DispatchResult {
    /// The payload carried no contact+message pair (e.g. a status
    /// notification). Acknowledged without touching any actor.
    NotAMessage,
    /// The payload was routed to an actor; this is what it returned.
    Handled(ProcessOutcome),
}

/// Extract the first message event from a payload, if it is one.
///
/// Provider webhooks also deliver status/read notifications on the same
/// endpoint; those lack `contacts` or `messages` and yield `None`.
pub fn extract_event(payload: &WebhookPayload) -> Option<InboundEvent> {
    for entry in &payload.entry {
        for change in &entry.changes {
            let value = &change.value;
            let (Some(contact), Some(message)) =
                (value.contacts.first(), value.messages.first())
            else {
                continue;
            };

            return Some(InboundEvent {
                contact: contact.wa_id.clone(),
                contact_name: contact.profile.as_ref().map(|p| p.name.clone()),
                message_id: message.id.clone(),
                message_type: message.message_type.clone(),
                text: message.text_body().map(str::to_string),
                timestamp: message.sent_at().unwrap_or_else(Utc::now),
            });
        }
    }
    None
}

/// Routes inbound payloads to per-user conversation actors.
pub struct Dispatcher<H, G, D> {
    store: Arc<H>,
    generator: Arc<G>,
    delivery: Arc<D>,
    system_prompt: Arc<str>,
    actors: DashMap<UserKey, Arc<Mutex<ConversationActor<H, G, D>>>>,
}

impl<H, G, D> Dispatcher<H, G, D>
where
    H: HistoryStore,
    G: ResponseGenerator,
    D: DeliveryChannel,
{
    pub fn new(
        store: Arc<H>,
        generator: Arc<G>,
        delivery: Arc<D>,
        system_prompt: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            store,
            generator,
            delivery,
            system_prompt: system_prompt.into(),
            actors: DashMap::new(),
        }
    }

    /// Route one payload. Non-message payloads are acknowledged without
    /// creating or touching an actor.
    pub async fn dispatch(&self, payload: &WebhookPayload) -> DispatchResult {
        let Some(event) = extract_event(payload) else {
            debug!("ignoring non-message webhook payload");
            return DispatchResult::NotAMessage;
        };
        let Some(key) = UserKey::from_contact(&event.contact) else {
            debug!("ignoring message event without a usable contact id");
            return DispatchResult::NotAMessage;
        };

        let lane = self.lane(&key);
        let actor = lane.lock().await;
        DispatchResult::Handled(actor.process_message(&event).await)
    }

    /// Delete all persisted history for a user, through that user's lane
    /// so it cannot interleave with an in-flight message.
    pub async fn clear_history(&self, key: &UserKey) -> Result<(), HistoryError> {
        let lane = self.lane(key);
        let actor = lane.lock().await;
        actor.clear_history().await
    }

    /// Number of actors created so far.
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    fn lane(&self, key: &UserKey) -> Arc<Mutex<ConversationActor<H, G, D>>> {
        self.actors
            .entry(key.clone())
            .or_insert_with(|| {
                Arc::new(Mutex::new(ConversationActor::new(
                    key.clone(),
                    Arc::clone(&self.store),
                    Arc::clone(&self.generator),
                    Arc::clone(&self.delivery),
                    Arc::clone(&self.system_prompt),
                )))
            })
            .clone()
    }
}
