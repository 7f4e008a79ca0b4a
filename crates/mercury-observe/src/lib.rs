//! Observability setup for Mercury.

pub mod tracing_setup;
