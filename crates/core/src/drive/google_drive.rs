//! Google Drive v3 client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::auth::AccessToken;
use crate::google::error_message;

use super::{DriveClient, DriveError, DriveFile};

/// Fields requested from `files.list`.
const LIST_FIELDS: &str = "nextPageToken,files(id,name,mimeType,modifiedTime)";

/// Google Drive API client.
pub struct GoogleDriveClient {
    client: Client,
    base_url: String,
    token: AccessToken,
}

impl GoogleDriveClient {
    /// Create a new Drive client.
    pub fn new(
        base_url: impl Into<String>,
        token: AccessToken,
        timeout: Duration,
    ) -> Result<Self, DriveError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Map a non-success response to an error.
    async fn check(response: Response, what: &str) -> Result<Response, DriveError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(&response.text().await.unwrap_or_default());
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DriveError::Unauthorized(message),
            StatusCode::NOT_FOUND => DriveError::NotFound(what.to_string()),
            _ => DriveError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }
}

/// Build a Drive search query matching `name` exactly.
fn name_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!("name = '{}'", escaped)
}

#[async_trait]
impl DriveClient for GoogleDriveClient {
    async fn list_files(&self, name: &str) -> Result<Vec<DriveFile>, DriveError> {
        let url = format!("{}/files", self.base_url);
        let query = name_query(name);

        debug!("Drive files.list: q={}", query);

        let mut files = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self
                .client
                .get(&url)
                .bearer_auth(self.token.secret())
                .query(&[("q", query.as_str()), ("fields", LIST_FIELDS)]);
            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = Self::check(request.send().await?, name).await?;
            let listing: FileList = response.json().await.map_err(|e| {
                DriveError::ParseError(format!("Failed to parse files.list response: {}", e))
            })?;

            files.extend(listing.files);
            match listing.next_page_token {
                Some(token) if !token.is_empty() => {
                    debug!("Drive files.list: fetching next page");
                    page_token = Some(token);
                }
                _ => break,
            }
        }

        debug!("Drive returned {} match(es) for '{}'", files.len(), name);

        Ok(files)
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>, DriveError> {
        let url = format!("{}/files/{}", self.base_url, urlencoding::encode(file_id));

        debug!("Drive files.get media: id={}", file_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token.secret())
            .query(&[("alt", "media")])
            .send()
            .await?;
        let response = Self::check(response, file_id).await?;

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

// ============================================================================
// Drive API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    next_page_token: Option<String>,
}
