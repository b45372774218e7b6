//! Mock object store for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::storage::{ObjectStore, StorageError, StorageRef};

/// A recorded upload for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    pub bucket: String,
    pub object_name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Mock implementation of the ObjectStore trait.
///
/// Every upload succeeds unless an error was injected, and is recorded.
#[derive(Debug)]
pub struct MockObjectStore {
    uploads: Arc<RwLock<Vec<RecordedUpload>>>,
    /// If set, the next upload will fail with this error.
    next_error: Arc<RwLock<Option<StorageError>>>,
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            uploads: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Get all recorded uploads.
    pub async fn recorded_uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.read().await.clone()
    }

    /// Get the number of uploads attempted.
    pub async fn upload_count(&self) -> usize {
        self.uploads.read().await.len()
    }

    /// Configure the next upload to fail with the given error.
    pub async fn set_next_error(&self, error: StorageError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        object_name: &str,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<StorageRef, StorageError> {
        self.uploads.write().await.push(RecordedUpload {
            bucket: bucket.to_string(),
            object_name: object_name.to_string(),
            bytes: bytes.to_vec(),
            mime_type: mime_type.to_string(),
        });

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(StorageRef {
            bucket: bucket.to_string(),
            object_name: object_name.to_string(),
        })
    }
}
