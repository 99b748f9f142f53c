//! Postdrop Handler - The ingest function: fetch, serialize, store, respond.
//!
//! The handler owns its collaborators behind the [`PayloadSource`] and
//! [`ObjectStorage`] seams so the deployed function and tests can wire
//! different implementations.

mod error;
mod handler;
mod logging;

pub use error::{IngestError, IngestResult};
pub use handler::IngestHandler;
pub use logging::{init_logging, LogFormat};

pub use postdrop_fetch::PayloadSource;
pub use postdrop_store::ObjectStorage;
