//! WhatsApp Cloud API delivery backend.

pub mod client;
pub mod types;

pub use client::WhatsAppClient;
