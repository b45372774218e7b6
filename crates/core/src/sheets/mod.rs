//! Spreadsheet output: append one summary row per processed image.

mod google_sheets;
mod types;

pub use google_sheets::GoogleSheetsClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when writing to a sheet.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Token rejected or sheet not shared with the caller (401/403).
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// Spreadsheet ID does not exist.
    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    /// API returned an error (e.g. unknown range).
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// A remote tabular document.
#[async_trait]
pub trait SheetWriter: Send + Sync {
    /// Append `cells` as a new last row of `range`, interpreting values as if
    /// typed by a user (so formulas are evaluated).
    ///
    /// Returns the number of cells the service reports as updated.
    async fn append_row(
        &self,
        sheet_id: &str,
        range: &str,
        cells: &[String],
    ) -> Result<u32, SheetsError>;
}

/// Browser URL of a spreadsheet.
pub fn sheet_url(sheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{}/edit", sheet_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_url() {
        assert_eq!(
            sheet_url("1AbC"),
            "https://docs.google.com/spreadsheets/d/1AbC/edit"
        );
    }
}
