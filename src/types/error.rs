use thiserror::Error;

/// pltrack error types
#[derive(Error, Debug)]
pub enum PltrackError {
    /// Date cell is not a valid dd/mm/yyyy calendar date
    #[error("invalid date: {0:?} (expected dd/mm/yyyy)")]
    InvalidDate(String),

    /// Failed to parse JSON input
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Sheet retrieval failed
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for pltrack
pub type Result<T> = std::result::Result<T, PltrackError>;
