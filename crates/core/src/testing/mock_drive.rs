//! Mock Drive client for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::drive::{DriveClient, DriveError, DriveFile};

/// Mock implementation of the DriveClient trait.
///
/// Provides controllable behavior for testing:
/// - Serve files from an in-memory listing
/// - Track lookups and downloads for assertions
/// - Simulate listing or download failures
///
/// # Example
///
/// ```rust,ignore
/// use gsimg_core::testing::{MockDrive, fixtures};
///
/// let drive = MockDrive::new();
/// drive.add_file(fixtures::drive_file("f1", "cat.jpg"), vec![0u8; 2000]).await;
///
/// let files = drive.list_files("cat.jpg").await?;
/// assert_eq!(files.len(), 1);
/// assert_eq!(drive.recorded_lookups().await, vec!["cat.jpg"]);
/// ```
#[derive(Debug)]
pub struct MockDrive {
    /// Files in listing order, with their content.
    files: Arc<RwLock<Vec<(DriveFile, Vec<u8>)>>>,
    /// Names passed to `list_files`.
    lookups: Arc<RwLock<Vec<String>>>,
    /// IDs passed to `download`.
    downloads: Arc<RwLock<Vec<String>>>,
    /// If set, the next listing will fail with this error.
    next_error: Arc<RwLock<Option<DriveError>>>,
    /// If set, the next download will fail with this error.
    download_error: Arc<RwLock<Option<DriveError>>>,
}

impl Default for MockDrive {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDrive {
    /// Create an empty mock Drive.
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(Vec::new())),
            lookups: Arc::new(RwLock::new(Vec::new())),
            downloads: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            download_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Add a file; listings return files in insertion order.
    pub async fn add_file(&self, file: DriveFile, bytes: Vec<u8>) {
        self.files.write().await.push((file, bytes));
    }

    /// Names looked up so far.
    pub async fn recorded_lookups(&self) -> Vec<String> {
        self.lookups.read().await.clone()
    }

    /// File IDs downloaded so far.
    pub async fn recorded_downloads(&self) -> Vec<String> {
        self.downloads.read().await.clone()
    }

    /// Configure the next listing to fail with the given error.
    pub async fn set_next_error(&self, error: DriveError) {
        *self.next_error.write().await = Some(error);
    }

    /// Configure the next download to fail with the given error.
    pub async fn set_download_error(&self, error: DriveError) {
        *self.download_error.write().await = Some(error);
    }
}

#[async_trait]
impl DriveClient for MockDrive {
    async fn list_files(&self, name: &str) -> Result<Vec<DriveFile>, DriveError> {
        self.lookups.write().await.push(name.to_string());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(self
            .files
            .read()
            .await
            .iter()
            .filter(|(file, _)| file.name == name)
            .map(|(file, _)| file.clone())
            .collect())
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>, DriveError> {
        self.downloads.write().await.push(file_id.to_string());

        if let Some(err) = self.download_error.write().await.take() {
            return Err(err);
        }

        self.files
            .read()
            .await
            .iter()
            .find(|(file, _)| file.id == file_id)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| DriveError::NotFound(file_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_lists_exact_name_only() {
        let drive = MockDrive::new();
        drive
            .add_file(fixtures::drive_file("f1", "cat.jpg"), vec![1, 2, 3])
            .await;
        drive
            .add_file(fixtures::drive_file("f2", "cat.jpeg"), vec![4])
            .await;

        let files = drive.list_files("cat.jpg").await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].id, "f1");
        assert_eq!(drive.download("f1").await.unwrap(), vec![1, 2, 3]);
        assert_eq!(drive.recorded_downloads().await, vec!["f1".to_string()]);
    }

    #[tokio::test]
    async fn test_error_injection_is_one_shot() {
        let drive = MockDrive::new();
        drive
            .set_next_error(DriveError::Unauthorized("expired".to_string()))
            .await;

        assert!(drive.list_files("cat.jpg").await.is_err());
        assert!(drive.list_files("cat.jpg").await.unwrap().is_empty());
        assert_eq!(drive.recorded_lookups().await.len(), 2);
    }

    #[tokio::test]
    async fn test_download_unknown_id() {
        let drive = MockDrive::new();
        let result = drive.download("missing").await;
        assert!(matches!(result, Err(DriveError::NotFound(id)) if id == "missing"));
    }
}
