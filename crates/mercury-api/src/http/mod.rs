//! HTTP layer for Mercury.
//!
//! Axum-based webhook surface: the subscription handshake, the message
//! receiver, and a health check.

pub mod handlers;
pub mod router;
