//! S3 (and S3-compatible) bucket client.

use async_trait::async_trait;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{ObjectStoreExt, PutPayload};

use super::{Credentials, UploadError};

/// Destination for uploaded objects.
#[async_trait]
pub trait ObjectSink: Send + Sync {
    /// Stores `data` under `key`, replacing any existing object.
    async fn put_object(&self, key: &str, data: Vec<u8>) -> Result<(), UploadError>;

    /// Human-readable location of `key`, used in progress output.
    fn location(&self, key: &str) -> String;
}

/// Object location for `key`, kept byte-for-byte.
///
/// `Path::from` would percent-encode characters such as `[`, `#` or `%`;
/// parsing keeps them literal and only rejects empty, `.`/`..` or
/// control-character segments.
pub fn object_path(key: &str) -> Result<Path, UploadError> {
    Path::parse(key).map_err(|source| UploadError::InvalidKey {
        key: key.to_string(),
        source,
    })
}

/// Region/endpoint overrides for the bucket client.
#[derive(Debug, Clone, Default)]
pub struct BucketSettings {
    /// Overrides `AWS_REGION` / `AWS_DEFAULT_REGION`.
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible providers
    /// (e.g. "http://localhost:9000" for MinIO).
    pub endpoint: Option<String>,
}

/// [`ObjectSink`] backed by `object_store`'s S3 client.
#[derive(Debug)]
pub struct S3Bucket {
    store: AmazonS3,
    bucket: String,
}

impl S3Bucket {
    /// Builds a client from the environment, then applies the explicit credentials and settings.
    ///
    /// No network call is made here.
    pub fn new(
        bucket: &str,
        credentials: &Credentials,
        settings: &BucketSettings,
    ) -> Result<Self, UploadError> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .with_access_key_id(credentials.access_key_id.as_str())
            .with_secret_access_key(credentials.secret_access_key.as_str());

        if let Some(region) = &settings.region {
            builder = builder.with_region(region.as_str());
        }
        if let Some(endpoint) = &settings.endpoint {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.as_str())
                .with_allow_http(allow_http);
        }

        let store = builder.build().map_err(UploadError::Client)?;
        Ok(Self {
            store,
            bucket: bucket.to_string(),
        })
    }
}

#[async_trait]
impl ObjectSink for S3Bucket {
    async fn put_object(&self, key: &str, data: Vec<u8>) -> Result<(), UploadError> {
        let size = data.len() as u64;
        let location = object_path(key)?;
        let start = std::time::Instant::now();

        self.store
            .put(&location, PutPayload::from(data))
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    "S3 upload failed"
                );
                UploadError::Put(e)
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );
        Ok(())
    }

    fn location(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }
}
