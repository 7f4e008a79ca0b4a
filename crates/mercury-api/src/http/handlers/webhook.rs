//! Webhook verification and receiver handlers.
//!
//! The provider sends a GET handshake when the webhook is registered
//! (`hub.mode` / `hub.verify_token` / `hub.challenge`) and POSTs every
//! subsequent event -- messages and status notifications alike -- to the
//! same path.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use mercury_core::conversation::dispatcher::DispatchResult;
use mercury_types::webhook::WebhookPayload;

use crate::state::AppState;

/// Query parameters of the subscription handshake.
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Check a subscription handshake against the configured secret.
///
/// Returns the challenge to echo back when the mode is `subscribe` and
/// the token matches.
pub fn verify_subscription(
    mode: Option<&str>,
    token: Option<&str>,
    challenge: Option<&str>,
    expected_token: &str,
) -> Option<String> {
    let mode = mode?;
    let token = token?;
    let challenge = challenge?;

    if mode == "subscribe" && token == expected_token {
        Some(challenge.to_string())
    } else {
        None
    }
}

/// GET /webhook - subscription verification handshake.
///
/// Echoes the challenge verbatim on success; 403 otherwise.
pub async fn verify_webhook(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    match verify_subscription(
        params.mode.as_deref(),
        params.verify_token.as_deref(),
        params.challenge.as_deref(),
        &state.verify_token,
    ) {
        Some(challenge) => {
            tracing::info!("webhook subscription verified");
            (StatusCode::OK, challenge).into_response()
        }
        None => {
            tracing::warn!("webhook subscription verification failed");
            (
                StatusCode::FORBIDDEN,
                Json(json!({"error": "verification failed"})),
            )
                .into_response()
        }
    }
}

/// POST /webhook - receive an inbound payload and route it to the core.
///
/// Status notifications (no contacts/messages) are acknowledged without
/// touching any conversation. Core failures return 500 with the
/// structured outcome in the body.
pub async fn receive_webhook(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let request_id = Uuid::now_v7();
    let payload: WebhookPayload = serde_json::from_value(body).unwrap_or_default();

    match state.dispatcher.dispatch(&payload).await {
        DispatchResult::NotAMessage => {
            tracing::debug!(%request_id, "acknowledged non-message webhook");
            (StatusCode::OK, Json(json!({"status": "ignored"}))).into_response()
        }
        DispatchResult::Handled(outcome) if outcome.success => {
            tracing::info!(%request_id, "webhook message processed");
            (StatusCode::OK, Json(outcome)).into_response()
        }
        DispatchResult::Handled(outcome) => {
            tracing::warn!(
                %request_id,
                error = outcome.error.as_deref().unwrap_or("unknown"),
                "webhook message processing failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Json(outcome)).into_response()
        }
    }
}
