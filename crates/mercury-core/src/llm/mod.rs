//! Response generation abstractions for Mercury.
//!
//! Implementations live in mercury-infra.

pub mod generator;
