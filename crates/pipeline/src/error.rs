//! Pipeline error types
//!
//! Errors returned by the session API. All of them are local to one session;
//! none is fatal to the process.

use bulk_sinks::SinkError;
use thiserror::Error;

use crate::session::SessionId;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Handle is unknown or already disconnected
    #[error("invalid session handle: {0}")]
    InvalidHandle(SessionId),

    /// Bulk size must be a positive integer
    #[error("bulk size must be positive")]
    InvalidBulkSize,

    /// A default sink failed to start
    #[error("failed to start sink: {0}")]
    Sink(#[from] SinkError),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
