use super::{types::Config, AuthMethod, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Request timeout is not 0
/// - Sheets range is not empty
/// - Endpoints are http(s) URLs
/// - Access token auth carries a token
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.endpoints.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "endpoints.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.sheets.range.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "sheets.range cannot be empty".to_string(),
        ));
    }

    let endpoints = [
        ("endpoints.drive", &config.endpoints.drive),
        ("endpoints.storage_upload", &config.endpoints.storage_upload),
        ("endpoints.vision", &config.endpoints.vision),
        ("endpoints.sheets", &config.endpoints.sheets),
    ];
    for (key, url) in endpoints {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be an http(s) URL, got '{}'",
                key, url
            )));
        }
    }

    if config.auth.method == AuthMethod::AccessToken
        && config
            .auth
            .access_token
            .as_ref()
            .is_none_or(|t| t.trim().is_empty())
    {
        return Err(ConfigError::ValidationError(
            "auth.access_token must be set when using access_token auth method".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_ignores_default_top() {
        // The run request carries the label count that is checked.
        let mut config = Config::default();
        config.defaults.top = 0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_timeout_zero_fails() {
        let mut config = Config::default();
        config.endpoints.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_range_fails() {
        let mut config = Config::default();
        config.sheets.range = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_bad_endpoint_fails() {
        let mut config = Config::default();
        config.endpoints.vision = "vision.googleapis.com/v1".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("endpoints.vision"));
    }

    #[test]
    fn test_validate_access_token_required() {
        let config = Config {
            auth: AuthConfig {
                method: AuthMethod::AccessToken,
                credentials_path: None,
                access_token: None,
            },
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
