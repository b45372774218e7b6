use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::drive::MatchPolicy;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub defaults: RunDefaults,
    #[serde(default)]
    pub drive: DriveConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub method: AuthMethod,
    /// Service account key file (required when method = "service_account").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<PathBuf>,
    /// Pre-issued OAuth2 bearer token (required when method = "access_token").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Service account key located through GOOGLE_APPLICATION_CREDENTIALS.
    #[default]
    ApplicationDefault,
    ServiceAccount,
    AccessToken,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::ApplicationDefault => "application_default",
            AuthMethod::ServiceAccount => "service_account",
            AuthMethod::AccessToken => "access_token",
        }
    }
}

/// Values used when a command-line flag is not given.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunDefaults {
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Object name prefix inside the bucket; also the first cell of the report row.
    #[serde(default)]
    pub folder: String,
    #[serde(default = "default_sheet_id")]
    pub sheet_id: String,
    /// Number of Vision labels to keep.
    #[serde(default = "default_top")]
    pub top: u32,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            image: default_image(),
            bucket: default_bucket(),
            folder: String::new(),
            sheet_id: default_sheet_id(),
            top: default_top(),
        }
    }
}

fn default_image() -> String {
    "YOUR_IMG_ON_DRIVE".to_string()
}

fn default_bucket() -> String {
    "YOUR_BUCKET_NAME".to_string()
}

fn default_sheet_id() -> String {
    "YOUR_SHEET_ID".to_string()
}

fn default_top() -> u32 {
    5
}

/// Drive lookup configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DriveConfig {
    /// Which file wins when several share the requested name.
    #[serde(default)]
    pub match_policy: MatchPolicy,
}

/// Sheets configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetsConfig {
    /// A1 range (usually just a tab name) that rows are appended to.
    #[serde(default = "default_range")]
    pub range: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            range: default_range(),
        }
    }
}

fn default_range() -> String {
    crate::pipeline::DEFAULT_SHEET_RANGE.to_string()
}

/// Base URLs of the Google APIs. Overridable for emulators and tests.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_drive_url")]
    pub drive: String,
    #[serde(default = "default_storage_upload_url")]
    pub storage_upload: String,
    #[serde(default = "default_vision_url")]
    pub vision: String,
    #[serde(default = "default_sheets_url")]
    pub sheets: String,
    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            drive: default_drive_url(),
            storage_upload: default_storage_upload_url(),
            vision: default_vision_url(),
            sheets: default_sheets_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_drive_url() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_storage_upload_url() -> String {
    "https://storage.googleapis.com/upload/storage/v1".to_string()
}

fn default_vision_url() -> String {
    "https://vision.googleapis.com/v1".to_string()
}

fn default_sheets_url() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Sanitized config for verbose display (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub defaults: RunDefaults,
    pub drive: DriveConfig,
    pub sheets: SheetsConfig,
    pub endpoints: EndpointsConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<PathBuf>,
    pub access_token_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            auth: SanitizedAuthConfig {
                method: config.auth.method.as_str().to_string(),
                credentials_path: config.auth.credentials_path.clone(),
                access_token_configured: config
                    .auth
                    .access_token
                    .as_ref()
                    .is_some_and(|t| !t.is_empty()),
            },
            defaults: config.defaults.clone(),
            drive: config.drive.clone(),
            sheets: config.sheets.clone(),
            endpoints: config.endpoints.clone(),
        }
    }
}
