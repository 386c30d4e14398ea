//! Shared pieces of the `generateorders` and `orderhistory` binaries.

pub mod browse;
pub mod error;
pub mod registry;

pub use error::CliError;
