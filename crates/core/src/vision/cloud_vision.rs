//! Google Cloud Vision v1 client (`images:annotate`, LABEL_DETECTION).

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::AccessToken;
use crate::google::error_message;

use super::{Label, LabelDetector, VisionError};

/// Cloud Vision API client.
pub struct CloudVisionClient {
    client: Client,
    base_url: String,
    token: AccessToken,
}

impl CloudVisionClient {
    /// Create a new Vision client.
    pub fn new(
        base_url: impl Into<String>,
        token: AccessToken,
        timeout: Duration,
    ) -> Result<Self, VisionError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }
}

#[async_trait]
impl LabelDetector for CloudVisionClient {
    async fn detect_labels(
        &self,
        image: &[u8],
        max_results: u32,
    ) -> Result<Vec<Label>, VisionError> {
        let url = format!("{}/images:annotate", self.base_url);

        debug!(
            "Vision images:annotate: {} bytes, maxResults={}",
            image.len(),
            max_results
        );

        let body = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: vec![Feature {
                    kind: "LABEL_DETECTION",
                    max_results,
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(&response.text().await.unwrap_or_default());
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    VisionError::Unauthorized(message)
                }
                StatusCode::BAD_REQUEST => VisionError::ImageRejected(message),
                _ => VisionError::ApiError {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let annotated: AnnotateResponse = response.json().await.map_err(|e| {
            VisionError::ParseError(format!("Failed to parse images:annotate response: {}", e))
        })?;

        let first = annotated.responses.into_iter().next().unwrap_or_default();

        // Per-image failures come back inside a 200 response.
        if let Some(err) = first.error {
            return Err(VisionError::ImageRejected(err.message));
        }

        Ok(first
            .label_annotations
            .into_iter()
            .map(|a| Label::new(a.description, a.score))
            .collect())
    }
}

// ============================================================================
// Vision API Request/Response Types (private)
// ============================================================================

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct EntityAnnotation {
    description: String,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    message: String,
}
