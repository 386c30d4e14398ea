use thiserror::Error;

use orderhistory_store::IntegrityReport;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid order timestamp {0}")]
    Timestamp(String),
    #[error(transparent)]
    Core(#[from] orderhistory_core::Error),
    #[error("integrity check failed: {0}")]
    Integrity(IntegrityReport),
}
