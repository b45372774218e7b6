//! Google Cloud Storage JSON API client (simple media upload).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use tracing::debug;

use crate::auth::AccessToken;
use crate::google::error_message;

use super::{ObjectStore, StorageError, StorageRef};

/// Google Cloud Storage client.
pub struct GcsClient {
    client: Client,
    upload_url: String,
    token: AccessToken,
}

impl GcsClient {
    /// Create a new client against the upload endpoint
    /// (e.g. `https://storage.googleapis.com/upload/storage/v1`).
    pub fn new(
        upload_url: impl Into<String>,
        token: AccessToken,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            upload_url: upload_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }
}

#[async_trait]
impl ObjectStore for GcsClient {
    async fn upload(
        &self,
        bucket: &str,
        object_name: &str,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<StorageRef, StorageError> {
        let url = format!("{}/b/{}/o", self.upload_url, urlencoding::encode(bucket));

        debug!(
            "GCS objects.insert: bucket={}, name={}, {} bytes, {}",
            bucket,
            object_name,
            bytes.len(),
            mime_type
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.secret())
            .query(&[
                ("uploadType", "media"),
                ("name", object_name),
                ("fields", "bucket,name"),
            ])
            .header(CONTENT_TYPE, mime_type)
            .body(bytes.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(&response.text().await.unwrap_or_default());
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    StorageError::Unauthorized(message)
                }
                StatusCode::NOT_FOUND => StorageError::BucketNotFound(bucket.to_string()),
                _ => StorageError::ApiError {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        response.json().await.map_err(|e| {
            StorageError::ParseError(format!("Failed to parse objects.insert response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_bytes, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GcsClient {
        GcsClient::new(
            server.uri(),
            AccessToken::new("ya29.test", None),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/b/my-bucket/o"))
            .and(query_param("uploadType", "media"))
            .and(query_param("name", "folder/cat.jpg"))
            .and(header("content-type", "image/jpeg"))
            .and(body_bytes(b"jpeg-bytes".to_vec()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "bucket": "my-bucket",
                "name": "folder/cat.jpg"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let storage_ref = client(&server)
            .upload("my-bucket", "folder/cat.jpg", b"jpeg-bytes", "image/jpeg")
            .await
            .unwrap();

        assert_eq!(storage_ref.bucket, "my-bucket");
        assert_eq!(storage_ref.object_name, "folder/cat.jpg");
    }

    #[tokio::test]
    async fn test_upload_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {"code": 403, "message": "robot does not have storage.objects.create access"}
            })))
            .mount(&server)
            .await;

        let result = client(&server)
            .upload("my-bucket", "folder/cat.jpg", b"x", "image/jpeg")
            .await;
        assert!(matches!(result, Err(StorageError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_upload_missing_bucket() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client(&server)
            .upload("nope", "folder/cat.jpg", b"x", "image/jpeg")
            .await;
        assert!(matches!(result, Err(StorageError::BucketNotFound(b)) if b == "nope"));
    }

    #[tokio::test]
    async fn test_upload_quota_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let result = client(&server)
            .upload("my-bucket", "folder/cat.jpg", b"x", "image/jpeg")
            .await;
        assert!(matches!(result, Err(StorageError::ApiError { status: 429, .. })));
    }
}
