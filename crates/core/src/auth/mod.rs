mod oauth;
mod static_token;
mod traits;
mod types;

pub use oauth::*;
pub use static_token::*;
pub use traits::*;
pub use types::*;

use std::path::PathBuf;
use std::time::Duration;

use crate::config::{AuthConfig, AuthMethod};

/// OAuth2 scopes needed by the four pipeline stages.
pub const PIPELINE_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/drive.readonly",
    "https://www.googleapis.com/auth/devstorage.full_control",
    "https://www.googleapis.com/auth/cloud-vision",
    "https://www.googleapis.com/auth/spreadsheets",
];

/// Environment variable naming the application default credentials file.
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Factory function to create a credential session from config
pub fn create_session(
    config: &AuthConfig,
    timeout: Duration,
) -> Result<Box<dyn AuthenticatedSession>, AuthError> {
    match config.method {
        AuthMethod::AccessToken => {
            let token = config.access_token.clone().ok_or_else(|| {
                AuthError::ConfigurationError(
                    "access_token must be set when using access_token auth method".to_string(),
                )
            })?;
            Ok(Box::new(StaticTokenSession::new(token)))
        }
        AuthMethod::ServiceAccount => {
            let path = config.credentials_path.as_ref().ok_or_else(|| {
                AuthError::ConfigurationError(
                    "credentials_path must be set when using service_account auth method"
                        .to_string(),
                )
            })?;
            Ok(Box::new(OAuthSession::from_file(
                path,
                PIPELINE_SCOPES,
                timeout,
            )?))
        }
        AuthMethod::ApplicationDefault => {
            let path = match &config.credentials_path {
                Some(path) => path.clone(),
                None => application_default_path(
                    std::env::var_os(CREDENTIALS_ENV).map(PathBuf::from),
                    std::env::var_os("HOME").map(PathBuf::from),
                )?,
            };
            Ok(Box::new(OAuthSession::from_file(
                &path,
                PIPELINE_SCOPES,
                timeout,
            )?))
        }
    }
}

/// Resolve the application default credentials file: the explicit
/// environment path if set, else the gcloud well-known location.
fn application_default_path(
    env_path: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf, AuthError> {
    if let Some(path) = env_path {
        return Ok(path);
    }

    let well_known = home
        .map(|h| h.join(".config/gcloud/application_default_credentials.json"))
        .filter(|p| p.exists());

    well_known.ok_or_else(|| {
        AuthError::CredentialsNotFound(format!(
            "set {} or run `gcloud auth application-default login`",
            CREDENTIALS_ENV
        ))
    })
}
