//! Business logic and port definitions for Mercury.
//!
//! This crate defines the "ports" (storage, generation, and delivery
//! traits) that the infrastructure layer implements, plus the per-user
//! conversation actor and the dispatcher that routes webhook payloads to
//! it. It depends only on `mercury-types` -- never on `mercury-infra` or
//! any database/IO crate.

pub mod conversation;
pub mod delivery;
pub mod llm;
pub mod storage;
