//! Shared domain types for Mercury.
//!
//! This crate contains the core domain types used across the Mercury relay:
//! conversation messages and history, user keys, webhook payload shapes,
//! processing outcomes, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod error;
pub mod message;
pub mod outcome;
pub mod user;
pub mod webhook;
