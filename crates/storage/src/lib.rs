//! Pitchside object storage gateway
//!
//! Provides blob storage for user, team, activity, and venue media with:
//! - AWS S3 integration for production storage
//! - Mock object store for testing and development
//! - Unique key generation and image content-type validation

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub mod mock;
pub mod s3;

pub use mock::MockObjectStore;
pub use s3::S3ObjectStore;

/// Default expiry for presigned read URLs
pub const DEFAULT_PRESIGN_EXPIRY: Duration = Duration::from_secs(3600);

/// Image content types accepted for photo uploads
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage configuration error: {0}")]
    Configuration(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Failed to generate presigned URL: {0}")]
    Presign(String),
}

/// Object storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for LocalStack testing; `None` in production
    pub endpoint_url: Option<String>,
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedObject {
    pub key: String,
    pub url: String,
    pub file_name: String,
    pub content_type: String,
}

/// Blob storage interface.
///
/// `delete` is best-effort by contract: failures are logged, never raised,
/// since blob cleanup must not fail the surrounding request.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(
        &self,
        data: Vec<u8>,
        file_name: &str,
        content_type: &str,
        prefix: &str,
        metadata: HashMap<String, String>,
    ) -> Result<UploadedObject, StorageError>;

    /// Delete the object a public URL points at. Returns whether the delete
    /// succeeded; failure is logged by the implementation.
    async fn delete(&self, url: &str) -> bool;

    /// Generate a presigned read URL for an object key.
    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String, StorageError>;
}

/// Check whether a content type is an accepted image format
pub fn is_allowed_image(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

/// Generate a unique storage key: `prefix/uuid.ext`, preserving the original
/// file extension when present.
pub fn generate_file_key(prefix: &str, file_name: &str) -> String {
    let unique_id = uuid::Uuid::new_v4();
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!("{}/{}.{}", prefix, unique_id, ext)
        }
        _ => format!("{}/{}", prefix, unique_id),
    }
}

/// Extract the object key from a public URL (everything after the host).
pub(crate) fn key_from_url(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("https://").or_else(|| url.strip_prefix("http://"))?;
    let (_host, path) = rest.split_once('/')?;
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

/// Extract the object key from a URL this store issued (`base_url/key`).
///
/// Matching against the store's own base URL handles path-style endpoints,
/// where the bucket is a path segment and must not leak into the key. Other
/// URLs fall back to the path after the host, which is the key for
/// virtual-hosted S3 URLs.
pub(crate) fn key_from_issued_url<'a>(base_url: &str, url: &'a str) -> Option<&'a str> {
    if let Some(rest) = url.strip_prefix(base_url) {
        let key = rest.strip_prefix('/')?;
        return if key.is_empty() { None } else { Some(key) };
    }
    key_from_url(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_allowed_image() {
        assert!(is_allowed_image("image/jpeg"));
        assert!(is_allowed_image("image/png"));
        assert!(is_allowed_image("image/gif"));
        assert!(!is_allowed_image("image/webp"));
        assert!(!is_allowed_image("application/pdf"));
        assert!(!is_allowed_image(""));
    }

    #[test]
    fn test_generate_file_key_preserves_extension() {
        let key = generate_file_key("activity-photos/42", "holiday.JPG");
        assert!(key.starts_with("activity-photos/42/"));
        assert!(key.ends_with(".JPG"));
    }

    #[test]
    fn test_generate_file_key_without_extension() {
        let key = generate_file_key("uploads", "raw");
        assert!(key.starts_with("uploads/"));
        assert!(!key.contains('.'));
    }

    #[test]
    fn test_generate_file_key_unique() {
        let a = generate_file_key("p", "x.png");
        let b = generate_file_key("p", "x.png");
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_from_issued_url_virtual_hosted() {
        let base = "https://pitchside-media.s3.eu-west-1.amazonaws.com";
        assert_eq!(
            key_from_issued_url(base, &format!("{}/team-photos/1/abc.png", base)),
            Some("team-photos/1/abc.png")
        );
    }

    #[test]
    fn test_key_from_issued_url_path_style_strips_bucket() {
        // LocalStack-style endpoint: the bucket is a path segment, not part
        // of the key
        let base = "http://localhost:4566/pitchside-media";
        assert_eq!(
            key_from_issued_url(base, &format!("{}/team-photos/1/abc.png", base)),
            Some("team-photos/1/abc.png")
        );
    }

    #[test]
    fn test_key_from_issued_url_foreign_url_falls_back() {
        let base = "http://localhost:4566/pitchside-media";
        assert_eq!(
            key_from_issued_url(
                base,
                "https://pitchside-media.s3.eu-west-1.amazonaws.com/old/key.png"
            ),
            Some("old/key.png")
        );
        assert_eq!(key_from_issued_url(base, base), None);
    }

    #[test]
    fn test_key_from_url() {
        assert_eq!(
            key_from_url("https://bucket.s3.eu-west-1.amazonaws.com/team-photos/1/abc.png"),
            Some("team-photos/1/abc.png")
        );
        assert_eq!(key_from_url("https://host.example"), None);
        assert_eq!(key_from_url("not a url"), None);
    }
}
