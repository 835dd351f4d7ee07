//! Persistence errors

use thiserror::Error;

/// Persistence errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Refused to overwrite an existing snapshot
    #[error("snapshot already exists at {0}")]
    AlreadyExists(String),

    /// Blocking write task failed to complete
    #[error("background task failed: {0}")]
    Task(String),
}

/// Result type for persistence operations
pub type DbResult<T> = Result<T, DbError>;
