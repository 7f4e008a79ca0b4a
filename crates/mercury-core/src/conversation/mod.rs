//! Per-user conversation processing.
//!
//! The actor owns one user's history and runs the receive -> persist ->
//! generate -> persist -> deliver pipeline; the dispatcher routes webhook
//! payloads to the right actor, one invocation at a time per user.

pub mod actor;
pub mod dispatcher;
