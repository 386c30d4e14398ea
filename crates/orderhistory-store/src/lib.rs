//! SQLite persistence for generated order histories.

pub mod sqlite;

pub use sqlite::{IntegrityReport, OrderStore, OrderWriter};

/// Default database file written by `generateorders` and read by `orderhistory`.
pub const DEFAULT_DATABASE: &str = "orderhistory.db";
