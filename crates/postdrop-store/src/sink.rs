//! Object storage sink.

use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use postdrop_config::StorageConfig;
use postdrop_core::{ObjectKey, ObjectReceipt, StoredObject};
use std::sync::Arc;
use tracing::debug;

/// Destination for stored objects.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write one object. The object is consumed.
    async fn put_object(&self, object: StoredObject) -> StoreResult<ObjectReceipt>;
}

/// [`ObjectStorage`] backed by an `object_store` implementation bound to one bucket.
#[derive(Clone)]
pub struct ObjectStoreSink {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl ObjectStoreSink {
    /// Amazon S3 sink. Credentials come from the environment.
    pub fn s3(config: &StorageConfig) -> StoreResult<Self> {
        if config.bucket.trim().is_empty() {
            return Err(StoreError::InvalidConfig("bucket name is empty".to_string()));
        }

        let store = AmazonS3Builder::from_env()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .build()?;

        debug!("Created S3 sink for bucket {} in {}", config.bucket, config.region);

        Ok(Self {
            store: Arc::new(store),
            bucket: config.bucket.clone(),
        })
    }

    /// In-process sink; objects live as long as the sink.
    pub fn in_memory(bucket: impl Into<String>) -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            bucket: bucket.into(),
        }
    }

    /// Read an object back, including its content type.
    pub async fn read_object(&self, key: &ObjectKey) -> StoreResult<StoredObject> {
        let result = self.store.get(&Path::from(key.as_str())).await?;
        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|value| {
                let value: &str = value.as_ref();
                value.to_string()
            })
            .unwrap_or_default();
        let body = result.bytes().await?.to_vec();

        Ok(StoredObject {
            bucket: self.bucket.clone(),
            key: key.clone(),
            body,
            content_type,
        })
    }
}

#[async_trait]
impl ObjectStorage for ObjectStoreSink {
    async fn put_object(&self, object: StoredObject) -> StoreResult<ObjectReceipt> {
        if object.bucket != self.bucket {
            return Err(StoreError::BucketMismatch {
                expected: self.bucket.clone(),
                actual: object.bucket,
            });
        }

        let StoredObject {
            key,
            body,
            content_type,
            ..
        } = object;

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let size = body.len();
        let result = self
            .store
            .put_opts(&Path::from(key.as_str()), PutPayload::from(body), options)
            .await?;

        debug!("Stored {} bytes at {}/{}", size, self.bucket, key);

        Ok(ObjectReceipt {
            key,
            e_tag: result.e_tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use postdrop_core::{KeyNaming, JSON_CONTENT_TYPE};

    fn sample_key() -> ObjectKey {
        KeyNaming::default().key_at(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap())
    }

    #[tokio::test]
    async fn test_put_and_read_back() {
        let sink = ObjectStoreSink::in_memory("bucket");
        let key = sample_key();
        let object = StoredObject::json("bucket", key.clone(), br#"[{"id":1}]"#.to_vec());

        let receipt = sink.put_object(object).await.unwrap();
        assert_eq!(receipt.key, key);

        let stored = sink.read_object(&key).await.unwrap();
        assert_eq!(stored.body, br#"[{"id":1}]"#);
        assert_eq!(stored.content_type, JSON_CONTENT_TYPE);
        assert_eq!(stored.bucket, "bucket");
    }

    #[tokio::test]
    async fn test_bucket_mismatch_rejected() {
        let sink = ObjectStoreSink::in_memory("bucket");
        let key = sample_key();
        let object = StoredObject::json("elsewhere", key.clone(), b"[]".to_vec());

        let err = sink.put_object(object).await.unwrap_err();
        assert!(matches!(err, StoreError::BucketMismatch { .. }));

        // Nothing was written.
        assert!(sink.read_object(&key).await.is_err());
    }

    #[test]
    fn test_s3_requires_bucket() {
        let config = StorageConfig {
            bucket: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            ObjectStoreSink::s3(&config),
            Err(StoreError::InvalidConfig(_))
        ));
    }
}
