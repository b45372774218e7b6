//! Pre-issued bearer token (e.g. from `gcloud auth print-access-token`).

use async_trait::async_trait;

use super::{AccessToken, AuthError, AuthenticatedSession};

/// Session that hands out a token obtained outside this process.
pub struct StaticTokenSession {
    token: String,
}

impl StaticTokenSession {
    pub fn new(token: String) -> Self {
        Self { token }
    }
}

#[async_trait]
impl AuthenticatedSession for StaticTokenSession {
    async fn access_token(&self) -> Result<AccessToken, AuthError> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "Access token is empty".to_string(),
            ));
        }
        Ok(AccessToken::new(token, None))
    }

    fn method_name(&self) -> &'static str {
        "access_token"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token_returned_trimmed() {
        let session = StaticTokenSession::new(" ya29.abc\n".to_string());
        let token = session.access_token().await.unwrap();
        assert_eq!(token.secret(), "ya29.abc");
        assert!(token.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_empty_token_rejected() {
        let session = StaticTokenSession::new("   ".to_string());
        let result = session.access_token().await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
    }

    #[test]
    fn test_method_name() {
        let session = StaticTokenSession::new("t".to_string());
        assert_eq!(session.method_name(), "access_token");
    }
}
