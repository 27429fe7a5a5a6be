//! AWS S3 object store implementation
//!
//! Production blob storage through AWS S3, with LocalStack support via a
//! custom endpoint URL.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

use crate::{
    generate_file_key, key_from_issued_url, ObjectStore, StorageConfig, StorageError,
    UploadedObject,
};

/// AWS S3 object store
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
    base_url: String,
}

impl S3ObjectStore {
    /// Create a new S3 object store
    pub async fn new(config: StorageConfig) -> Result<Self, StorageError> {
        if config.bucket.is_empty() {
            return Err(StorageError::Configuration(
                "S3 bucket name cannot be empty".to_string(),
            ));
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some(endpoint_url) = &config.endpoint_url {
            tracing::info!("Using custom S3 endpoint: {}", endpoint_url);
            loader = loader.endpoint_url(endpoint_url);
        }

        let aws_config = loader.load().await;
        let client = S3Client::new(&aws_config);

        let base_url = match &config.endpoint_url {
            Some(endpoint_url) => format!("{}/{}", endpoint_url.trim_end_matches('/'), config.bucket),
            None => format!(
                "https://{}.s3.{}.amazonaws.com",
                config.bucket, config.region
            ),
        };

        Ok(Self {
            client,
            bucket: config.bucket,
            base_url,
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(
        &self,
        data: Vec<u8>,
        file_name: &str,
        content_type: &str,
        prefix: &str,
        metadata: HashMap<String, String>,
    ) -> Result<UploadedObject, StorageError> {
        let key = generate_file_key(prefix, file_name);

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(data));

        for (meta_key, meta_value) in metadata {
            request = request.metadata(meta_key, meta_value);
        }

        request.send().await.map_err(|e| {
            tracing::error!(error = %e, key = %key, "S3 upload failed");
            StorageError::Upload(format!("Error uploading file to S3: {}", e))
        })?;

        let url = format!("{}/{}", self.base_url, key);

        Ok(UploadedObject {
            key,
            url,
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
        })
    }

    async fn delete(&self, url: &str) -> bool {
        let Some(key) = key_from_issued_url(&self.base_url, url) else {
            tracing::warn!(url = %url, "Cannot extract S3 key from URL; skipping delete");
            return false;
        };

        match self
            .client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Error deleting file from S3");
                false
            }
        }
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Presign(format!("Error generating presigned URL: {}", e)))?;

        Ok(presigned.uri().to_string())
    }
}
