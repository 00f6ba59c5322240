//! Errors raised by media adapter calls.

use thiserror::Error;

/// Failure of a single call into the media adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The bridge could not be reached
    #[error("adapter unreachable: {0}")]
    Transport(String),

    /// The bridge answered with a non-success status
    #[error("adapter returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The payload did not have the expected shape
    #[error("malformed adapter data: {0}")]
    Decode(String),

    /// The requested object does not exist (any more)
    #[error("{0} is not available")]
    Unavailable(String),

    /// The adapter has been shut down
    #[error("adapter closed")]
    Closed,
}

impl AdapterError {
    /// Short code for logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            AdapterError::Transport(_) => "ADAPTER_TRANSPORT",
            AdapterError::Status { .. } => "ADAPTER_STATUS",
            AdapterError::Decode(_) => "ADAPTER_DECODE",
            AdapterError::Unavailable(_) => "ADAPTER_UNAVAILABLE",
            AdapterError::Closed => "ADAPTER_CLOSED",
        }
    }

    /// Whether the next poll cycle has a chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            AdapterError::Transport(_) | AdapterError::Unavailable(_) => true,
            AdapterError::Status { status, .. } => *status >= 500 || *status == 429,
            AdapterError::Decode(_) | AdapterError::Closed => false,
        }
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        AdapterError::Decode(err.to_string())
    }
}
