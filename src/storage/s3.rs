use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};

use super::error::StorageError;
use super::traits::BlobStore;
use crate::config::StorageConfig;

/// S3-compatible blob store for image payloads.
///
/// Works against AWS S3 or any S3-compatible endpoint (MinIO, R2) via the
/// `storage.endpoint` setting. Credentials resolve through the standard
/// provider chain (environment, profile, instance metadata), never through
/// service configuration.
pub struct S3BlobStore {
    bucket: Box<Bucket>,
    bucket_name: String,
    region: String,
    endpoint: Option<String>,
    presign_expiry_secs: u32,
}

impl S3BlobStore {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse()
                .map_err(|e| StorageError::Config(format!("invalid region {}: {e}", config.region)))?,
        };
        let credentials = Credentials::default()
            .map_err(|e| StorageError::Config(format!("credential resolution failed: {e}")))?;
        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Config(e.to_string()))?;

        Ok(Self {
            bucket,
            bucket_name: config.bucket.clone(),
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
            presign_expiry_secs: config.presign_expiry_secs,
        })
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> Result<(), StorageError> {
        self.bucket
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        self.bucket
            .delete_object(key)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;
        // S3 DELETE is idempotent and does not report prior existence.
        Ok(true)
    }

    async fn presigned_url(&self, key: &str) -> Result<String, StorageError> {
        self.bucket
            .presign_get(key, self.presign_expiry_secs, None)
            .await
            .map_err(|e| StorageError::Read(e.to_string()))
    }

    fn public_url(&self, key: &str) -> String {
        static_object_url(&self.bucket_name, &self.region, self.endpoint.as_deref(), key)
    }
}

/// Direct object URL from the bucket/key naming convention.
fn static_object_url(bucket: &str, region: &str, endpoint: Option<&str>, key: &str) -> String {
    match endpoint {
        Some(endpoint) => format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
        None => format!("https://{bucket}.s3.{region}.amazonaws.com/{key}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aws_style_static_url() {
        let url = static_object_url("notes-images", "us-east-1", None, "notes/n1/a.png");
        assert_eq!(
            url,
            "https://notes-images.s3.us-east-1.amazonaws.com/notes/n1/a.png"
        );
    }

    #[test]
    fn custom_endpoint_static_url() {
        let url = static_object_url(
            "notes-images",
            "us-east-1",
            Some("http://localhost:9000/"),
            "notes/n1/a.png",
        );
        assert_eq!(url, "http://localhost:9000/notes-images/notes/n1/a.png");
    }
}
