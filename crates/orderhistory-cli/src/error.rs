use thiserror::Error;

use crate::registry::RegistryError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("core error: {0}")]
    Core(#[from] orderhistory_core::Error),
    #[error("generation error: {0}")]
    Generation(#[from] orderhistory_generate::GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
