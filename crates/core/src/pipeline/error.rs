//! Error types for the pipeline module.

use thiserror::Error;

use crate::auth::AuthError;
use crate::drive::DriveError;
use crate::sheets::SheetsError;
use crate::storage::StorageError;
use crate::vision::VisionError;

use super::types::Stage;

/// Why a run ended in the failed state. Every variant is terminal.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Request cannot be processed (checked before any call).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Credentials could not be obtained; no stage ran.
    #[error("Credentials unavailable: {0}")]
    Auth(#[from] AuthError),

    /// No file with the requested name on Drive.
    #[error("No file named '{file_name}' on Drive")]
    NotFound { file_name: String },

    /// Listing or download from Drive failed.
    #[error("Cannot download '{file_name}' from Drive: {source}")]
    Download {
        file_name: String,
        #[source]
        source: DriveError,
    },

    /// Upload to the bucket failed.
    #[error("Cannot upload '{object_name}' to Cloud Storage: {source}")]
    Upload {
        object_name: String,
        #[source]
        source: StorageError,
    },

    /// Label detection failed or rejected the image.
    #[error("Vision API cannot analyze '{file_name}': {source}")]
    Analysis {
        file_name: String,
        #[source]
        source: VisionError,
    },

    /// Label detection succeeded but found nothing.
    #[error("Vision API returned no labels for '{file_name}'")]
    NoLabels { file_name: String },

    /// Appending the row failed.
    #[error("Cannot write row to Google Sheet '{sheet_id}': {source}")]
    Write {
        sheet_id: String,
        #[source]
        source: SheetsError,
    },

    /// The append call succeeded but reported zero cells.
    #[error("Google Sheet '{sheet_id}' reported no cells written")]
    NothingWritten { sheet_id: String },
}

/// Coarse classification of a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    Auth,
    NotFound,
    Transfer,
    AnalysisFailed,
    AnalysisEmpty,
    Write,
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::Auth(_) => ErrorKind::Auth,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Download { .. } | Self::Upload { .. } => ErrorKind::Transfer,
            Self::Analysis { .. } => ErrorKind::AnalysisFailed,
            Self::NoLabels { .. } => ErrorKind::AnalysisEmpty,
            Self::Write { .. } | Self::NothingWritten { .. } => ErrorKind::Write,
        }
    }

    /// The stage that failed, or `None` when the run never started.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::InvalidRequest(_) | Self::Auth(_) => None,
            Self::NotFound { .. } | Self::Download { .. } => Some(Stage::Fetch),
            Self::Upload { .. } => Some(Stage::Archive),
            Self::Analysis { .. } | Self::NoLabels { .. } => Some(Stage::Label),
            Self::Write { .. } | Self::NothingWritten { .. } => Some(Stage::Record),
        }
    }
}
