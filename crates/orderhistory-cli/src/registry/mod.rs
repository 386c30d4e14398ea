mod logging;
mod report;

pub use logging::init_logging;
pub use report::{REPORT_FILE, report_path_for, write_report};

use thiserror::Error;

/// Errors raised while writing run artifacts.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
