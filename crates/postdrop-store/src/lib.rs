//! Postdrop Store - Writes fetched payloads into object storage.

mod error;
mod sink;

pub use error::{StoreError, StoreResult};
pub use sink::{ObjectStorage, ObjectStoreSink};
