//! Core domain types for Postdrop.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Media type written alongside every stored object.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Raw response obtained from the remote API for one invocation.
///
/// The content is never validated; its structure belongs to the remote API.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPayload {
    pub content: serde_json::Value,
    pub retrieved_at: DateTime<Utc>,
}

impl FetchedPayload {
    pub fn new(content: serde_json::Value) -> Self {
        Self {
            content,
            retrieved_at: Utc::now(),
        }
    }

    /// Serialize the content to compact JSON bytes for the object body.
    pub fn to_body(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.content)?)
    }
}

/// How object keys are named: `<prefix>/<name>-<millis>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyNaming {
    pub prefix: String,
    pub name: String,
}

impl KeyNaming {
    /// Create a naming scheme, normalizing slashes around the prefix.
    pub fn new(prefix: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into().trim_matches('/').to_string();
        let name = name.into();

        if prefix.is_empty() {
            return Err(Error::InvalidInput("key prefix must not be empty".to_string()));
        }
        if name.is_empty() || name.contains('/') {
            return Err(Error::InvalidInput(format!(
                "object name must be a non-empty single path segment, got '{}'",
                name
            )));
        }

        Ok(Self { prefix, name })
    }

    /// Build the key for an invocation happening at `at`.
    pub fn key_at(&self, at: DateTime<Utc>) -> ObjectKey {
        ObjectKey(format!(
            "{}/{}-{}.json",
            self.prefix,
            self.name,
            at.timestamp_millis()
        ))
    }

    /// Build the key for an invocation happening now.
    pub fn key_now(&self) -> ObjectKey {
        self.key_at(Utc::now())
    }
}

impl Default for KeyNaming {
    fn default() -> Self {
        Self {
            prefix: "data".to_string(),
            name: "posts".to_string(),
        }
    }
}

/// Key of an object in the bucket.
///
/// Only unique across invocations with distinct millisecond timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObjectKey {
    fn from(key: &str) -> Self {
        ObjectKey(key.to_string())
    }
}

impl From<ObjectKey> for String {
    fn from(key: ObjectKey) -> Self {
        key.0
    }
}

/// The artifact handed to object storage.
///
/// Ownership moves to the storage layer on write.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: ObjectKey,
    pub body: Vec<u8>,
    pub content_type: String,
}

impl StoredObject {
    /// Create a JSON object destined for `bucket` under `key`.
    pub fn json(bucket: impl Into<String>, key: ObjectKey, body: Vec<u8>) -> Self {
        Self {
            bucket: bucket.into(),
            key,
            body,
            content_type: JSON_CONTENT_TYPE.to_string(),
        }
    }
}

/// Acknowledgement returned by the storage layer after a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectReceipt {
    pub key: ObjectKey,
    pub e_tag: Option<String>,
}
