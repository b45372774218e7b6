//! The analysis pipeline: fetch from Drive, archive to Cloud Storage,
//! label with Vision, record in Sheets.

mod error;
mod runner;
mod types;

pub use error::{ErrorKind, PipelineError};
pub use runner::{ImagePipeline, DEFAULT_SHEET_RANGE};
pub use types::*;
