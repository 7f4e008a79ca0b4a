//! Infrastructure implementations for Mercury.
//!
//! Concrete adapters behind the mercury-core ports: SQLite-backed history
//! storage, the Anthropic Messages API generator, the WhatsApp Cloud API
//! delivery client, and environment-driven configuration.

pub mod config;
pub mod llm;
pub mod sqlite;
pub mod whatsapp;
