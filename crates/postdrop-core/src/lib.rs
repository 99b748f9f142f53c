//! Postdrop Core - Data model and response contract for the ingest handler.

mod error;
mod response;
mod types;

pub use error::{Error, Result};
pub use response::{ErrorBody, HandlerResponse, SuccessBody, FAILURE_MESSAGE, SUCCESS_MESSAGE};
pub use types::*;
