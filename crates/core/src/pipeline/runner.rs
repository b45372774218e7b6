//! Sequential four-stage runner.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::drive::{DriveClient, DriveError, FileRecord, MatchPolicy};
use crate::sheets::{ReportRow, SheetWriter, SheetsError};
use crate::storage::{object_name, ObjectStore, StorageError, StorageRef};
use crate::vision::{LabelDetector, LabelSummary, VisionError};

use super::error::PipelineError;
use super::types::{PipelineRequest, ProgressCallback, RunReport, StageEvent};

/// Default sheet range rows are appended to.
pub const DEFAULT_SHEET_RANGE: &str = "Sheet1";

/// Drives one file through fetch, archive, label and record.
///
/// Stages run strictly in order. The first failure ends the run and no
/// later stage is attempted.
pub struct ImagePipeline {
    drive: Arc<dyn DriveClient>,
    store: Arc<dyn ObjectStore>,
    detector: Arc<dyn LabelDetector>,
    sheets: Arc<dyn SheetWriter>,
    match_policy: MatchPolicy,
    sheet_range: String,
    progress: Option<ProgressCallback>,
}

impl ImagePipeline {
    pub fn new(
        drive: Arc<dyn DriveClient>,
        store: Arc<dyn ObjectStore>,
        detector: Arc<dyn LabelDetector>,
        sheets: Arc<dyn SheetWriter>,
    ) -> Self {
        Self {
            drive,
            store,
            detector,
            sheets,
            match_policy: MatchPolicy::default(),
            sheet_range: DEFAULT_SHEET_RANGE.to_string(),
            progress: None,
        }
    }

    /// Choose how to resolve several Drive files sharing the requested name.
    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    /// Set the A1 range rows are appended to.
    pub fn with_sheet_range(mut self, range: impl Into<String>) -> Self {
        self.sheet_range = range.into();
        self
    }

    /// Receive an event after each completed stage.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    fn emit(&self, event: StageEvent) {
        if let Some(ref callback) = self.progress {
            callback(&event);
        }
    }

    /// Run all four stages for `request`.
    pub async fn run(&self, request: &PipelineRequest) -> Result<RunReport, PipelineError> {
        request.validate()?;
        let started = Instant::now();

        info!("Processing '{}'", request.file_name);

        // Fetch
        let file = self
            .fetch(&request.file_name)
            .await
            .map_err(|source| PipelineError::Download {
                file_name: request.file_name.clone(),
                source,
            })?
            .ok_or_else(|| PipelineError::NotFound {
                file_name: request.file_name.clone(),
            })?;
        self.emit(StageEvent::Fetched {
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            modified_time: file.modified_time.clone(),
            size: file.size(),
        });

        // Archive
        let stored = self
            .archive(&file, &request.bucket, &request.folder)
            .await
            .map_err(|source| PipelineError::Upload {
                object_name: object_name(&request.folder, &file.name),
                source,
            })?;
        self.emit(StageEvent::Archived {
            bucket: stored.bucket.clone(),
            object_name: stored.object_name.clone(),
        });

        // Label
        let labels = self
            .label(&file.bytes, request.top)
            .await
            .map_err(|source| PipelineError::Analysis {
                file_name: file.name.clone(),
                source,
            })?
            .ok_or_else(|| PipelineError::NoLabels {
                file_name: file.name.clone(),
            })?;
        self.emit(StageEvent::Labeled {
            top: request.top,
            summary: labels.as_str().to_string(),
        });

        // Record
        let row = ReportRow::new(&request.folder, &file, &stored, &labels);
        let updated_cells = self
            .record(&request.sheet_id, &row)
            .await
            .map_err(|source| PipelineError::Write {
                sheet_id: request.sheet_id.clone(),
                source,
            })?;
        if updated_cells == 0 {
            return Err(PipelineError::NothingWritten {
                sheet_id: request.sheet_id.clone(),
            });
        }
        self.emit(StageEvent::Recorded {
            cells: updated_cells,
        });

        info!(
            "Processed '{}' in {:?}: {} cells written",
            file.name,
            started.elapsed(),
            updated_cells
        );

        Ok(RunReport {
            file_name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            modified_time: file.modified_time.clone(),
            size_bytes: file.size(),
            stored,
            labels,
            row,
            sheet_id: request.sheet_id.clone(),
            updated_cells,
        })
    }

    /// Look up `file_name` on Drive and download it.
    ///
    /// Returns `Ok(None)` when no file has that name. Nothing is
    /// downloaded in that case.
    pub async fn fetch(&self, file_name: &str) -> Result<Option<FileRecord>, DriveError> {
        let matches = self.drive.list_files(file_name).await?;
        if matches.len() > 1 {
            warn!(
                "{} Drive files named '{}', choosing by {:?}",
                matches.len(),
                file_name,
                self.match_policy
            );
        }

        let Some(file) = self.match_policy.select(matches) else {
            debug!("No Drive file named '{}'", file_name);
            return Ok(None);
        };

        debug!("Downloading Drive file {} ('{}')", file.id, file.name);
        let bytes = self.drive.download(&file.id).await?;
        Ok(Some(FileRecord::from_download(file, bytes)))
    }

    /// Upload the file's bytes to `bucket` as `{prefix}/{name}`.
    pub async fn archive(
        &self,
        file: &FileRecord,
        bucket: &str,
        prefix: &str,
    ) -> Result<StorageRef, StorageError> {
        let name = object_name(prefix, &file.name);
        self.store
            .upload(bucket, &name, &file.bytes, &file.mime_type)
            .await
    }

    /// Detect labels and summarize at most `top` of them.
    ///
    /// Returns `Ok(None)` when the service found no labels.
    pub async fn label(
        &self,
        bytes: &[u8],
        top: u32,
    ) -> Result<Option<LabelSummary>, VisionError> {
        let labels = self.detector.detect_labels(bytes, top).await?;
        if labels.len() > top as usize {
            debug!(
                "Label detector returned {} labels, keeping {}",
                labels.len(),
                top
            );
        }
        Ok(LabelSummary::from_labels(&labels, top as usize))
    }

    /// Append the row to the configured range. Returns the updated cell count.
    pub async fn record(&self, sheet_id: &str, row: &ReportRow) -> Result<u32, SheetsError> {
        self.sheets
            .append_row(sheet_id, &self.sheet_range, &row.cells())
            .await
    }
}
