//! Types for the pipeline module.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::sheets::{sheet_url, ReportRow};
use crate::storage::StorageRef;
use crate::vision::LabelSummary;

use super::error::PipelineError;

/// One of the four sequential steps of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Fetch,
    Archive,
    Label,
    Record,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Fetch => "fetch",
            Stage::Archive => "archive",
            Stage::Label => "label",
            Stage::Record => "record",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a run needs besides the service clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    /// Name of the source file on Drive.
    pub file_name: String,
    /// Destination bucket.
    pub bucket: String,
    /// Object name prefix; also the first cell of the report row.
    pub folder: String,
    /// Destination spreadsheet ID.
    pub sheet_id: String,
    /// Number of labels to keep (at least 1).
    pub top: u32,
}

impl PipelineRequest {
    /// Reject requests that could never succeed, before any network call.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.file_name.trim().is_empty() {
            return Err(PipelineError::InvalidRequest(
                "file name cannot be empty".to_string(),
            ));
        }
        if self.bucket.trim().is_empty() {
            return Err(PipelineError::InvalidRequest(
                "bucket cannot be empty".to_string(),
            ));
        }
        if self.sheet_id.trim().is_empty() {
            return Err(PipelineError::InvalidRequest(
                "sheet ID cannot be empty".to_string(),
            ));
        }
        if self.top == 0 {
            return Err(PipelineError::InvalidRequest(
                "label count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Diagnostic event emitted after each completed stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageEvent {
    Fetched {
        name: String,
        mime_type: String,
        modified_time: String,
        size: usize,
    },
    Archived {
        bucket: String,
        object_name: String,
    },
    Labeled {
        top: u32,
        summary: String,
    },
    Recorded {
        cells: u32,
    },
}

impl fmt::Display for StageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageEvent::Fetched {
                name,
                mime_type,
                modified_time,
                size,
            } => write!(
                f,
                "Downloaded '{}' ({}, {}, size: {})",
                name, mime_type, modified_time, size
            ),
            StageEvent::Archived {
                bucket,
                object_name,
            } => write!(f, "Uploaded '{}' to GCS bucket '{}'", object_name, bucket),
            StageEvent::Labeled { top, summary } => {
                write!(f, "Top {} labels from Vision API: {}", top, summary)
            }
            StageEvent::Recorded { cells } => write!(f, "Added {} cells to Google Sheet", cells),
        }
    }
}

/// Callback invoked with each stage event.
pub type ProgressCallback = Arc<dyn Fn(&StageEvent) + Send + Sync>;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub file_name: String,
    pub mime_type: String,
    pub modified_time: String,
    pub size_bytes: usize,
    pub stored: StorageRef,
    pub labels: LabelSummary,
    pub row: ReportRow,
    pub sheet_id: String,
    pub updated_cells: u32,
}

impl RunReport {
    /// Browser URL of the destination spreadsheet.
    pub fn sheet_url(&self) -> String {
        sheet_url(&self.sheet_id)
    }
}
