use super::{types::Config, ConfigError};

/// Validate configuration.
///
/// Provider credentials are deliberately not checked here: a missing key or
/// base URL is reported by the provider client on the first translation.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.provider.timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "provider.timeout_ms cannot be 0".to_string(),
        ));
    }

    Ok(())
}
