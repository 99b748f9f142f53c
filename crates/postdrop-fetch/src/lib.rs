//! Postdrop Fetch - Retrieves the remote JSON resource for each invocation.

mod client;
mod error;

pub use client::{PayloadSource, SourceClient};
pub use error::{FetchError, FetchResult};
