//! Google Sheets v4 client (`spreadsheets.values.append`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::AccessToken;
use crate::google::error_message;

use super::{SheetWriter, SheetsError};

/// Google Sheets API client.
pub struct GoogleSheetsClient {
    client: Client,
    base_url: String,
    token: AccessToken,
}

impl GoogleSheetsClient {
    /// Create a new Sheets client.
    pub fn new(
        base_url: impl Into<String>,
        token: AccessToken,
        timeout: Duration,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }
}

#[async_trait]
impl SheetWriter for GoogleSheetsClient {
    async fn append_row(
        &self,
        sheet_id: &str,
        range: &str,
        cells: &[String],
    ) -> Result<u32, SheetsError> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}:append",
            self.base_url,
            urlencoding::encode(sheet_id),
            urlencoding::encode(range)
        );

        debug!(
            "Sheets values.append: sheet={}, range={}, {} cells",
            sheet_id,
            range,
            cells.len()
        );

        let body = ValueRange {
            values: vec![cells.to_vec()],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.secret())
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(&response.text().await.unwrap_or_default());
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    SheetsError::Unauthorized(message)
                }
                StatusCode::NOT_FOUND => SheetsError::SpreadsheetNotFound(sheet_id.to_string()),
                _ => SheetsError::ApiError {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let appended: AppendResponse = response.json().await.map_err(|e| {
            SheetsError::ParseError(format!("Failed to parse values.append response: {}", e))
        })?;

        Ok(appended
            .updates
            .and_then(|u| u.updated_cells)
            .unwrap_or(0))
    }
}

// ============================================================================
// Sheets API Request/Response Types (private)
// ============================================================================

#[derive(Debug, Serialize)]
struct ValueRange {
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    #[serde(default)]
    updates: Option<UpdateValuesResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateValuesResponse {
    #[serde(default)]
    updated_cells: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GoogleSheetsClient {
        GoogleSheetsClient::new(
            server.uri(),
            AccessToken::new("ya29.test", None),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn cells() -> Vec<String> {
        vec!["folder".to_string(), "=HYPERLINK(\"u\", \"cat.jpg\")".to_string()]
    }

    #[tokio::test]
    async fn test_append_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/spreadsheets/sheet-123/values/Sheet1:append"))
            .and(query_param("valueInputOption", "USER_ENTERED"))
            .and(body_json(serde_json::json!({
                "values": [["folder", "=HYPERLINK(\"u\", \"cat.jpg\")"]]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "spreadsheetId": "sheet-123",
                "tableRange": "Sheet1!A1:F4",
                "updates": {
                    "spreadsheetId": "sheet-123",
                    "updatedRange": "Sheet1!A5:B5",
                    "updatedRows": 1,
                    "updatedColumns": 2,
                    "updatedCells": 2
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let updated = client(&server)
            .append_row("sheet-123", "Sheet1", &cells())
            .await
            .unwrap();
        assert_eq!(updated, 2);
    }

    #[tokio::test]
    async fn test_append_row_missing_updates_is_zero() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "spreadsheetId": "sheet-123"
            })))
            .mount(&server)
            .await;

        let updated = client(&server)
            .append_row("sheet-123", "Sheet1", &cells())
            .await
            .unwrap();
        assert_eq!(updated, 0);
    }

    #[tokio::test]
    async fn test_append_row_unknown_sheet() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client(&server)
            .append_row("nope", "Sheet1", &cells())
            .await;
        assert!(matches!(result, Err(SheetsError::SpreadsheetNotFound(id)) if id == "nope"));
    }

    #[tokio::test]
    async fn test_append_row_bad_range() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "message": "Unable to parse range: Shet1", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let result = client(&server)
            .append_row("sheet-123", "Shet1", &cells())
            .await;
        match result {
            Err(SheetsError::ApiError { status, message }) => {
                assert_eq!(status, 400);
                assert!(message.contains("Unable to parse range"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
