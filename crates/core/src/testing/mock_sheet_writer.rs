//! Mock sheet writer for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::sheets::{SheetWriter, SheetsError};

/// A recorded append for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAppend {
    pub sheet_id: String,
    pub range: String,
    pub cells: Vec<String>,
}

/// Mock implementation of the SheetWriter trait.
///
/// By default every append reports all of its cells as updated.
#[derive(Debug)]
pub struct MockSheetWriter {
    appends: Arc<RwLock<Vec<RecordedAppend>>>,
    /// Overrides the reported updated-cell count.
    updated_cells: Arc<RwLock<Option<u32>>>,
    /// If set, the next append will fail with this error.
    next_error: Arc<RwLock<Option<SheetsError>>>,
}

impl Default for MockSheetWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSheetWriter {
    pub fn new() -> Self {
        Self {
            appends: Arc::new(RwLock::new(Vec::new())),
            updated_cells: Arc::new(RwLock::new(None)),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Get all recorded appends.
    pub async fn recorded_appends(&self) -> Vec<RecordedAppend> {
        self.appends.read().await.clone()
    }

    pub async fn append_count(&self) -> usize {
        self.appends.read().await.len()
    }

    /// Report `cells` as the updated count for subsequent appends.
    pub async fn set_updated_cells(&self, cells: u32) {
        *self.updated_cells.write().await = Some(cells);
    }

    /// Configure the next append to fail with the given error.
    pub async fn set_next_error(&self, error: SheetsError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl SheetWriter for MockSheetWriter {
    async fn append_row(
        &self,
        sheet_id: &str,
        range: &str,
        cells: &[String],
    ) -> Result<u32, SheetsError> {
        self.appends.write().await.push(RecordedAppend {
            sheet_id: sheet_id.to_string(),
            range: range.to_string(),
            cells: cells.to_vec(),
        });

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let reported = *self.updated_cells.read().await;
        Ok(reported.unwrap_or(cells.len() as u32))
    }
}
