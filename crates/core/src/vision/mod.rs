//! Label detection: ranked (description, confidence) pairs for an image.

mod cloud_vision;
mod types;

pub use cloud_vision::CloudVisionClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during label detection.
#[derive(Debug, Error)]
pub enum VisionError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Token rejected or API not enabled for the project (401/403).
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// The service could not process the image (bad or unsupported content).
    #[error("Image rejected: {0}")]
    ImageRejected(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// A remote image-labeling service.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Detect up to `max_results` labels, in the service's ranking order.
    async fn detect_labels(
        &self,
        image: &[u8],
        max_results: u32,
    ) -> Result<Vec<Label>, VisionError>;
}
