use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("parlance.db")
}

/// Translation provider (DeepL-compatible) configuration.
///
/// Read once at startup and handed to the provider client by value; nothing
/// mutates it afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Base endpoint, e.g. "https://api-free.deepl.com/v2"
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
    /// API key sent in the Authorization header
    #[serde(default)]
    pub api_key: String,
    /// Authorization scheme placed before the key
    #[serde(default = "default_auth_scheme")]
    pub auth_scheme: String,
    /// Request timeout in milliseconds (default: 8000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_base_url(),
            api_key: String::new(),
            auth_scheme: default_auth_scheme(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_provider_base_url() -> String {
    "https://api-free.deepl.com/v2".to_string()
}

fn default_auth_scheme() -> String {
    "DeepL-Auth-Key".to_string()
}

fn default_timeout_ms() -> u64 {
    8000
}

/// Cross-origin settings for browser clients.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; a single "*" allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub provider: SanitizedProviderConfig,
    pub cors: CorsConfig,
}

/// Sanitized provider config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedProviderConfig {
    pub base_url: String,
    pub auth_scheme: String,
    pub api_key_configured: bool,
    pub timeout_ms: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            provider: SanitizedProviderConfig {
                base_url: config.provider.base_url.clone(),
                auth_scheme: config.provider.auth_scheme.clone(),
                api_key_configured: !config.provider.api_key.trim().is_empty(),
                timeout_ms: config.provider.timeout_ms,
            },
            cors: config.cors.clone(),
        }
    }
}
