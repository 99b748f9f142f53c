//! The ingest handler.

use crate::error::{IngestError, IngestResult};
use postdrop_config::Config;
use postdrop_core::{HandlerResponse, KeyNaming, ObjectKey, StoredObject};
use postdrop_fetch::{PayloadSource, SourceClient};
use postdrop_store::{ObjectStorage, ObjectStoreSink};
use std::sync::Arc;
use tracing::{debug, error};

/// Fetches the remote resource and writes it to the bucket, once per invocation.
///
/// Cheap to clone; clones share the same clients.
#[derive(Clone)]
pub struct IngestHandler {
    source: Arc<dyn PayloadSource>,
    storage: Arc<dyn ObjectStorage>,
    bucket: String,
    naming: KeyNaming,
}

impl IngestHandler {
    pub fn new(
        source: Arc<dyn PayloadSource>,
        storage: Arc<dyn ObjectStorage>,
        bucket: impl Into<String>,
        naming: KeyNaming,
    ) -> Self {
        Self {
            source,
            storage,
            bucket: bucket.into(),
            naming,
        }
    }

    /// Build the production handler: HTTP source and S3 sink.
    pub fn from_config(config: &Config) -> IngestResult<Self> {
        let sink = ObjectStoreSink::s3(&config.storage)?;
        Self::with_storage(config, Arc::new(sink))
    }

    /// Build a handler with the configured source and a caller-supplied sink.
    pub fn with_storage(config: &Config, storage: Arc<dyn ObjectStorage>) -> IngestResult<Self> {
        let source = SourceClient::from_config(&config.source)?;
        let naming = KeyNaming::new(&config.storage.key_prefix, &config.storage.object_name)
            .map_err(|e| IngestError::Setup(e.to_string()))?;

        Ok(Self::new(
            Arc::new(source),
            storage,
            config.storage.bucket.clone(),
            naming,
        ))
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Run one invocation. The event is accepted but not inspected.
    pub async fn handle(&self, _event: serde_json::Value) -> HandlerResponse {
        match self.ingest().await {
            Ok(key) => HandlerResponse::success(&key),
            Err(e) => {
                error!(error = ?e, "Error fetching data or uploading to S3: {}", e);
                HandlerResponse::failure()
            }
        }
    }

    /// Fetch, serialize and store; stops at the first failure.
    pub async fn ingest(&self) -> IngestResult<ObjectKey> {
        let payload = self.source.fetch().await?;

        let key = self.naming.key_now();
        let body = payload.to_body()?;
        debug!(
            "Prepared {} byte object {} from payload fetched at {}",
            body.len(),
            key,
            payload.retrieved_at
        );

        let object = StoredObject::json(&self.bucket, key.clone(), body);
        let receipt = self.storage.put_object(object).await?;

        debug!(
            e_tag = receipt.e_tag.as_deref().unwrap_or("-"),
            "Data uploaded to {}/{}", self.bucket, key
        );
        Ok(key)
    }
}
