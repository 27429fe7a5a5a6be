//! Mock object store implementation
//!
//! In-memory blob capture for testing without external dependencies. Can be
//! switched into a failing mode to exercise upload-failure handling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{generate_file_key, ObjectStore, StorageError, UploadedObject};

/// Object captured by the mock store
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub object: UploadedObject,
    pub data: Vec<u8>,
    pub metadata: HashMap<String, String>,
    pub stored_at: DateTime<Utc>,
}

/// In-memory object store for tests
#[derive(Clone, Default)]
pub struct MockObjectStore {
    objects: Arc<Mutex<Vec<StoredObject>>>,
    deleted: Arc<Mutex<Vec<String>>>,
    fail_uploads: Arc<AtomicBool>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent uploads fail, to exercise batch rollback paths.
    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// All objects currently stored (uploaded and not deleted).
    pub fn stored(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }

    /// URLs passed to `delete`, in order.
    pub fn deleted_urls(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn stored_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn upload(
        &self,
        data: Vec<u8>,
        file_name: &str,
        content_type: &str,
        prefix: &str,
        metadata: HashMap<String, String>,
    ) -> Result<UploadedObject, StorageError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::Upload("mock upload failure".to_string()));
        }

        let key = generate_file_key(prefix, file_name);
        let object = UploadedObject {
            url: format!("https://mock-storage.local/{}", key),
            key,
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
        };

        self.objects.lock().unwrap().push(StoredObject {
            object: object.clone(),
            data,
            metadata,
            stored_at: Utc::now(),
        });

        Ok(object)
    }

    async fn delete(&self, url: &str) -> bool {
        self.deleted.lock().unwrap().push(url.to_string());

        let mut objects = self.objects.lock().unwrap();
        let before = objects.len();
        objects.retain(|stored| stored.object.url != url);
        objects.len() < before
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String, StorageError> {
        Ok(format!(
            "https://mock-storage.local/{}?expires={}",
            key,
            expires_in.as_secs()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_and_delete_roundtrip() {
        let store = MockObjectStore::new();

        let object = store
            .upload(
                vec![1, 2, 3],
                "photo.png",
                "image/png",
                "activity-photos/1",
                HashMap::new(),
            )
            .await
            .unwrap();

        assert_eq!(store.stored_count(), 1);
        assert!(object.url.contains("activity-photos/1/"));

        assert!(store.delete(&object.url).await);
        assert_eq!(store.stored_count(), 0);
        assert_eq!(store.deleted_urls(), vec![object.url]);
    }

    #[tokio::test]
    async fn test_delete_unknown_url_returns_false() {
        let store = MockObjectStore::new();
        assert!(!store.delete("https://mock-storage.local/missing").await);
    }

    #[tokio::test]
    async fn test_failing_mode() {
        let store = MockObjectStore::new();
        store.set_fail_uploads(true);

        let result = store
            .upload(vec![], "x.png", "image/png", "p", HashMap::new())
            .await;
        assert!(matches!(result, Err(StorageError::Upload(_))));
        assert_eq!(store.stored_count(), 0);

        store.set_fail_uploads(false);
        assert!(store
            .upload(vec![], "x.png", "image/png", "p", HashMap::new())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_presigned_url_carries_expiry() {
        let store = MockObjectStore::new();
        let url = store
            .presigned_url("k/v.png", Duration::from_secs(3600))
            .await
            .unwrap();
        assert!(url.contains("expires=3600"));
    }
}
