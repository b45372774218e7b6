//! Object storage: archive a file's bytes into a bucket.

mod gcs;
mod types;

pub use gcs::GcsClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when uploading to the object store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Token rejected or missing permission on the bucket (401/403).
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// Bucket does not exist.
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// A bucket-based binary store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `bytes` to `object_name` in `bucket` with the given content type.
    ///
    /// Overwrites an existing object of the same name.
    async fn upload(
        &self,
        bucket: &str,
        object_name: &str,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<StorageRef, StorageError>;
}
