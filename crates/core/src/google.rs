//! Shared bits of the Google REST APIs.

use serde::Deserialize;

/// Standard Google API error envelope: `{"error": {"code": .., "message": ..}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Extract a readable message from an error response body, falling back to
/// the raw (truncated) body when it is not the standard envelope.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{}: {}", status, envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => body.chars().take(200).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_envelope() {
        let body = r#"{"error": {"code": 403, "message": "Insufficient Permission", "status": "PERMISSION_DENIED"}}"#;
        assert_eq!(error_message(body), "PERMISSION_DENIED: Insufficient Permission");
    }

    #[test]
    fn test_error_message_without_status() {
        let body = r#"{"error": {"code": 400, "message": "Bad image"}}"#;
        assert_eq!(error_message(body), "Bad image");
    }

    #[test]
    fn test_error_message_plain_body() {
        assert_eq!(error_message("Service Unavailable"), "Service Unavailable");
    }
}
