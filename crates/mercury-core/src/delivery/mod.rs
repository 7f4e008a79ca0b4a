//! Outbound delivery abstractions for Mercury.
//!
//! Implementations live in mercury-infra.

pub mod channel;
