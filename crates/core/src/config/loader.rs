use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides.
///
/// `PARLANCE_`-prefixed variables override file values, using `__` between
/// nested keys (`PARLANCE_PROVIDER__API_KEY`). `DEEPL_API_KEY` is accepted as
/// a shorthand for the provider key.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(
            Env::raw()
                .only(&["DEEPL_API_KEY"])
                .map(|_| "provider.api_key".into()),
        )
        .merge(Env::prefixed("PARLANCE_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
