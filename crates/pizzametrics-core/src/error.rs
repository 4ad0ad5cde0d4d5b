//! Shared error type across pizzametrics crates.

use thiserror::Error;

/// Stable error codes used in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration could not be loaded or failed validation.
    Config,
    /// A record carried a tag that would break the line format.
    BadRecord,
    /// The ingestion endpoint could not be reached.
    Transport,
    /// The ingestion endpoint answered with a non-success status.
    Status,
    /// Anything else.
    Internal,
}

impl ErrorCode {
    /// String representation used in structured log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG",
            ErrorCode::BadRecord => "BAD_RECORD",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::Status => "STATUS",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PizzaMetricsError>;

/// Unified error type used by core and collector.
#[derive(Debug, Error)]
pub enum PizzaMetricsError {
    #[error("config: {0}")]
    Config(String),
    #[error("bad record: {0}")]
    BadRecord(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("ingestion endpoint returned status {status}")]
    Status { status: u16 },
    #[error("internal: {0}")]
    Internal(String),
}

impl PizzaMetricsError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            PizzaMetricsError::Config(_) => ErrorCode::Config,
            PizzaMetricsError::BadRecord(_) => ErrorCode::BadRecord,
            PizzaMetricsError::Transport(_) => ErrorCode::Transport,
            PizzaMetricsError::Status { .. } => ErrorCode::Status,
            PizzaMetricsError::Internal(_) => ErrorCode::Internal,
        }
    }
}
