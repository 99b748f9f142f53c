//! Error taxonomy for one invocation.

use thiserror::Error;

/// Result type for ingest operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Any failure of an invocation. Callers only ever see a generic failure;
/// the variant is for the logs.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] postdrop_fetch::FetchError),

    #[error("Payload error: {0}")]
    Payload(#[from] postdrop_core::Error),

    #[error("Upload failed: {0}")]
    Store(#[from] postdrop_store::StoreError),

    #[error("Handler setup failed: {0}")]
    Setup(String),
}
