use thiserror::Error;

/// Core error type shared across orderhistory crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A count or other caller-provided argument is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A catalog record could not be split or parsed.
    #[error("catalog line {line}: {message}")]
    Catalog { line: u64, message: String },
    /// Database error or adapter failure.
    #[error("database error: {0}")]
    Db(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results returned by orderhistory crates.
pub type Result<T> = std::result::Result<T, Error>;
