//! Error types for object storage writes.

use thiserror::Error;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when writing to object storage.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Object storage error: {0}")]
    Backend(#[from] object_store::Error),

    #[error("Object targets bucket '{actual}' but this sink writes to '{expected}'")]
    BucketMismatch { expected: String, actual: String },

    #[error("Invalid storage configuration: {0}")]
    InvalidConfig(String),
}
