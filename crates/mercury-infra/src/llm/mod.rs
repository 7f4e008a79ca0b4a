//! Generator backends for Mercury.

pub mod anthropic;
