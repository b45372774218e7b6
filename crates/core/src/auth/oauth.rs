//! OAuth2 token exchange for credentials files.
//!
//! Service account keys use the JWT bearer grant (RFC 7523): an RS256-signed
//! assertion is exchanged at the key's `token_uri`. Authorized user files
//! (gcloud application-default login) use the refresh token grant.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{AuthorizedUser, CredentialsFile, ServiceAccountKey};
use super::{AccessToken, AuthError, AuthenticatedSession};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for service account assertions (Google's maximum).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Session backed by a Google credentials file.
pub struct OAuthSession {
    client: Client,
    credentials: CredentialsFile,
    scopes: Vec<String>,
}

impl OAuthSession {
    /// Create a session from already-parsed credentials.
    pub fn new(
        credentials: CredentialsFile,
        scopes: &[&str],
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            credentials,
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Read and parse a credentials JSON file.
    pub fn from_file(path: &Path, scopes: &[&str], timeout: Duration) -> Result<Self, AuthError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AuthError::CredentialsNotFound(format!("{}: {}", path.display(), e))
        })?;

        let credentials: CredentialsFile = serde_json::from_str(&raw).map_err(|e| {
            AuthError::InvalidCredentials(format!(
                "{} is not a supported credentials file: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded credentials file {:?}: {:?}", path, credentials);

        Self::new(credentials, scopes, timeout)
    }

    /// Build the signed JWT assertion for a service account key.
    fn assertion(&self, key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String, AuthError> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: &key.client_email,
            scope: self.scopes.join(" "),
            aud: &key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = key.private_key_id.clone();

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| AuthError::InvalidCredentials(format!("Bad private key: {}", e)))?;

        jsonwebtoken::encode(&header, &claims, &encoding_key)
            .map_err(|e| AuthError::InvalidCredentials(format!("Failed to sign assertion: {}", e)))
    }

    async fn service_account_token(
        &self,
        key: &ServiceAccountKey,
    ) -> Result<AccessToken, AuthError> {
        debug!("Exchanging service account assertion for {}", key.client_email);

        let now = Utc::now();
        let assertion = self.assertion(key, now)?;
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

        self.exchange(&key.token_uri, &params, now).await
    }

    async fn authorized_user_token(&self, user: &AuthorizedUser) -> Result<AccessToken, AuthError> {
        debug!("Refreshing user token for client {}", user.client_id);

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", user.client_id.as_str()),
            ("client_secret", user.client_secret.as_str()),
            ("refresh_token", user.refresh_token.as_str()),
        ];

        self.exchange(&user.token_uri, &params, Utc::now()).await
    }

    /// POST a token grant and interpret the response.
    async fn exchange(
        &self,
        token_uri: &str,
        params: &[(&str, &str)],
        issued_at: DateTime<Utc>,
    ) -> Result<AccessToken, AuthError> {
        let response = self.client.post(token_uri).form(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<TokenErrorResponse>(&body)
                .map(|e| match e.error_description {
                    Some(desc) => format!("{}: {}", e.error, desc),
                    None => e.error,
                })
                .unwrap_or(body);

            return Err(if status.is_client_error() {
                AuthError::InvalidCredentials(reason)
            } else {
                AuthError::ServiceUnavailable(format!("HTTP {}: {}", status.as_u16(), reason))
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            AuthError::ServiceUnavailable(format!("Failed to parse token response: {}", e))
        })?;

        let expires_at = token
            .expires_in
            .map(|secs| issued_at + chrono::Duration::seconds(secs));

        Ok(AccessToken::new(token.access_token, expires_at))
    }
}

#[async_trait]
impl AuthenticatedSession for OAuthSession {
    async fn access_token(&self) -> Result<AccessToken, AuthError> {
        match &self.credentials {
            CredentialsFile::ServiceAccount(key) => self.service_account_token(key).await,
            CredentialsFile::AuthorizedUser(user) => self.authorized_user_token(user).await,
        }
    }

    fn method_name(&self) -> &'static str {
        match self.credentials {
            CredentialsFile::ServiceAccount(_) => "service_account",
            CredentialsFile::AuthorizedUser(_) => "authorized_user",
        }
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}
