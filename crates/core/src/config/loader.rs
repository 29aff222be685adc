use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix of environment variables that override configuration keys.
/// Nested keys use `__`, e.g. `TICKETDESK_SERVER__PORT`.
pub const ENV_PREFIX: &str = "TICKETDESK_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(with_env(defaults().merge(Toml::file(path))))
}

/// Load configuration from defaults and environment variables only
pub fn load_default_config() -> Result<Config, ConfigError> {
    extract(with_env(defaults()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
}

// A bare `PORT` overrides every other source.
fn with_env(figment: Figment) -> Figment {
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    figment
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}
