pub mod auth;
pub mod config;
pub mod drive;
mod google;
pub mod pipeline;
pub mod sheets;
pub mod storage;
pub mod testing;
pub mod vision;

pub use auth::{create_session, AccessToken, AuthError, AuthenticatedSession, PIPELINE_SCOPES};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, AuthMethod,
    Config, ConfigError, SanitizedConfig,
};
pub use drive::{DriveClient, DriveError, GoogleDriveClient, MatchPolicy};
pub use pipeline::{
    ErrorKind, ImagePipeline, PipelineError, PipelineRequest, ProgressCallback, RunReport, Stage,
    StageEvent,
};
pub use sheets::{GoogleSheetsClient, SheetWriter, SheetsError};
pub use storage::{GcsClient, ObjectStore, StorageError};
pub use vision::{CloudVisionClient, LabelDetector, VisionError};
