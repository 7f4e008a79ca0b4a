//! SQLite persistence for Mercury.

pub mod history;
pub mod pool;
