use async_trait::async_trait;
use thiserror::Error;

use super::types::AccessToken;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Credentials not found: {0}")]
    CredentialsNotFound(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Token service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::ServiceUnavailable(e.to_string())
    }
}

/// A source of OAuth2 bearer tokens for the Google APIs.
///
/// The pipeline asks for a token once, before the first stage, and hands it
/// to every service client.
#[async_trait]
pub trait AuthenticatedSession: Send + Sync {
    /// Obtain a bearer token valid for the pipeline scopes.
    async fn access_token(&self) -> Result<AccessToken, AuthError>;

    /// Name of this credential flow
    fn method_name(&self) -> &'static str;
}
