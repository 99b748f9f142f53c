//! Response returned to the function runtime.

use crate::error::Result;
use crate::types::ObjectKey;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Message reported on a successful upload.
pub const SUCCESS_MESSAGE: &str = "Data uploaded to S3 successfully";

/// Message reported for any failure, whatever its cause.
pub const FAILURE_MESSAGE: &str = "Failed to fetch data or upload to S3";

/// Proxy-style response: a status code and a JSON-encoded body string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

/// Body of a 200 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessBody {
    pub message: String,
    pub object_key: String,
}

/// Body of a 500 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl HandlerResponse {
    pub fn success(key: &ObjectKey) -> Self {
        let body = serde_json::json!({
            "message": SUCCESS_MESSAGE,
            "objectKey": key.as_str(),
        });

        Self {
            status_code: 200,
            body: body.to_string(),
        }
    }

    pub fn failure() -> Self {
        let body = serde_json::json!({ "error": FAILURE_MESSAGE });

        Self {
            status_code: 500,
            body: body.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Decode the JSON body into a typed value.
    pub fn parse_body<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
