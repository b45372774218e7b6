//! Mock label detector for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::vision::{Label, LabelDetector, VisionError};

/// A recorded detection request for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedDetection {
    /// Size of the submitted image.
    pub image_size: usize,
    /// Requested maximum number of labels.
    pub max_results: u32,
}

/// Mock implementation of the LabelDetector trait.
///
/// Returns the configured labels, honoring `max_results` the way the real
/// service normally does. Call [`MockLabelDetector::set_ignore_max_results`]
/// to simulate a service that returns more than asked for.
#[derive(Debug)]
pub struct MockLabelDetector {
    labels: Arc<RwLock<Vec<Label>>>,
    detections: Arc<RwLock<Vec<RecordedDetection>>>,
    ignore_max_results: Arc<RwLock<bool>>,
    /// If set, the next detection will fail with this error.
    next_error: Arc<RwLock<Option<VisionError>>>,
}

impl Default for MockLabelDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLabelDetector {
    /// Create a detector that finds no labels.
    pub fn new() -> Self {
        Self {
            labels: Arc::new(RwLock::new(Vec::new())),
            detections: Arc::new(RwLock::new(Vec::new())),
            ignore_max_results: Arc::new(RwLock::new(false)),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the labels returned by subsequent detections, in relevance order.
    pub async fn set_labels(&self, labels: Vec<Label>) {
        *self.labels.write().await = labels;
    }

    /// Return every configured label regardless of `max_results`.
    pub async fn set_ignore_max_results(&self, ignore: bool) {
        *self.ignore_max_results.write().await = ignore;
    }

    pub async fn recorded_detections(&self) -> Vec<RecordedDetection> {
        self.detections.read().await.clone()
    }

    pub async fn detection_count(&self) -> usize {
        self.detections.read().await.len()
    }

    /// Configure the next detection to fail with the given error.
    pub async fn set_next_error(&self, error: VisionError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl LabelDetector for MockLabelDetector {
    async fn detect_labels(
        &self,
        image: &[u8],
        max_results: u32,
    ) -> Result<Vec<Label>, VisionError> {
        self.detections.write().await.push(RecordedDetection {
            image_size: image.len(),
            max_results,
        });

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let labels = self.labels.read().await.clone();
        if *self.ignore_max_results.read().await {
            return Ok(labels);
        }
        Ok(labels.into_iter().take(max_results as usize).collect())
    }
}
