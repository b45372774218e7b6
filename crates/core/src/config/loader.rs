use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable prefix; nested keys are separated by `__`
/// (e.g. `GSIMG_AUTH__ACCESS_TOKEN`).
const ENV_PREFIX: &str = "GSIMG_";

/// Keys whose environment values are taken verbatim. The generic env
/// provider would read `GSIMG_DEFAULTS__FOLDER=2021` as an integer.
const TEXT_KEYS: &[&str] = &[
    "auth.credentials_path",
    "auth.access_token",
    "defaults.image",
    "defaults.bucket",
    "defaults.folder",
    "defaults.sheet_id",
    "sheets.range",
];

/// Merge `GSIMG_` environment overrides on top of `figment`.
fn merge_env(figment: Figment) -> Figment {
    let env = Env::prefixed(ENV_PREFIX).split("__");
    let text: Vec<(String, String)> = env
        .iter()
        .filter(|(key, _)| TEXT_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.as_str().to_string(), value))
        .collect();

    text.into_iter()
        .fold(figment.merge(env), |figment, (key, value)| {
            figment.merge(Serialized::default(&key, value))
        })
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    merge_env(Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(path)))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from file if it exists, otherwise from defaults plus
/// environment overrides.
pub fn load_config_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        return load_config(path);
    }

    merge_env(Figment::from(Serialized::defaults(Config::default())))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
