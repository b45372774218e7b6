//! Drive access: look up a file by name and download its content.

mod google_drive;
mod types;

pub use google_drive::GoogleDriveClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the drive service.
#[derive(Debug, Error)]
pub enum DriveError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Token rejected or missing scope (401/403).
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// File ID does not exist (404 on download).
    #[error("File not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// A remote file-hosting service.
#[async_trait]
pub trait DriveClient: Send + Sync {
    /// List files whose name equals `name` exactly, in service order.
    async fn list_files(&self, name: &str) -> Result<Vec<DriveFile>, DriveError>;

    /// Download the full binary content of a file.
    async fn download(&self, file_id: &str) -> Result<Vec<u8>, DriveError>;
}
