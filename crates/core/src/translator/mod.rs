//! Translation provider integration.
//!
//! The workflow engine only sees the [`TranslationProvider`] trait. The
//! production implementation is [`DeeplClient`], which speaks the DeepL v2
//! `/translate` wire format.

mod deepl;
mod types;

pub use deepl::{extract_translation, to_deepl_lang, truncate_snippet, DeeplClient};
pub use types::{TranslateRequest, TranslateResponse, TranslationEntry};

use async_trait::async_trait;
use thiserror::Error;

/// Maximum number of characters of a provider error body kept in messages.
pub const ERROR_SNIPPET_MAX_CHARS: usize = 400;

/// Anything that went wrong while asking the provider for a translation.
///
/// Callers treat every variant the same way; the variants exist so the
/// message keeps the cause and metrics can be labelled.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Base URL or credential missing.
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Request rejected locally before any network call.
    #[error("Invalid translation request: {0}")]
    InvalidRequest(String),

    /// The call exceeded the configured timeout.
    #[error("Provider request timed out: {0}")]
    Timeout(String),

    /// Could not connect to the provider.
    #[error("Provider connection failed: {0}")]
    Connection(String),

    /// Any other transport-level failure.
    #[error("Provider request failed: {0}")]
    Http(String),

    /// Provider answered with a non-success status.
    #[error("Provider HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Provider answered 2xx but the body was not what we expected.
    #[error("Failed to parse provider response: {0}")]
    Parse(String),
}

impl ProviderError {
    /// Classify a reqwest transport error.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else if err.is_connect() {
            ProviderError::Connection(err.to_string())
        } else {
            ProviderError::Http(err.to_string())
        }
    }

    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::InvalidRequest(_) => "invalid_request",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::Connection(_) => "connection",
            ProviderError::Http(_) => "http",
            ProviderError::Api { .. } => "api_error",
            ProviderError::Parse(_) => "parse",
        }
    }
}

/// An external service that turns text into another language.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short identifier used in logs and metrics.
    fn name(&self) -> &str;

    /// Translate `text` into `target_lang`.
    ///
    /// An empty or absent `source_lang` lets the provider auto-detect. An
    /// empty or absent `target_lang` fails without contacting the provider.
    /// Exactly one attempt is made per call.
    async fn translate(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: Option<&str>,
    ) -> Result<String, ProviderError>;
}
