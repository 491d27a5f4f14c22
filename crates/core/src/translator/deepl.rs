//! DeepL API client.
//!
//! Endpoint: `POST <base_url>/translate`
//! Auth header: `Authorization: <auth_scheme> <api_key>`

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tracing::debug;

use super::types::{TranslateRequest, TranslateResponse};
use super::{ProviderError, TranslationProvider, ERROR_SNIPPET_MAX_CHARS};
use crate::config::ProviderConfig;
use crate::metrics::{PROVIDER_REQUESTS, PROVIDER_REQUEST_DURATION};

/// DeepL translation client.
pub struct DeeplClient {
    client: Client,
    config: ProviderConfig,
}

impl DeeplClient {
    /// Create a new client. Credentials are checked per call, not here, so a
    /// server can start without a key and report the problem on use.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ProviderError::from_transport)?;

        Ok(Self { client, config })
    }

    async fn send(
        &self,
        url: &str,
        api_key: &str,
        body: &TranslateRequest<'_>,
    ) -> Result<String, ProviderError> {
        debug!(url = url, target_lang = body.target_lang, "Calling translation provider");

        let response = self
            .client
            .post(url)
            .header(
                AUTHORIZATION,
                format!("{} {}", self.config.auth_scheme.trim(), api_key),
            )
            .json(body)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body: truncate_snippet(&body, ERROR_SNIPPET_MAX_CHARS),
            });
        }

        let text = response
            .text()
            .await
            .map_err(ProviderError::from_transport)?;

        extract_translation(&text)
    }
}

#[async_trait]
impl TranslationProvider for DeeplClient {
    fn name(&self) -> &str {
        "deepl"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: Option<&str>,
    ) -> Result<String, ProviderError> {
        let base_url = self.config.base_url.trim();
        if base_url.is_empty() {
            return Err(ProviderError::NotConfigured(
                "provider base URL is blank".to_string(),
            ));
        }

        let api_key = self.config.api_key.trim();
        if api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "provider API key is missing (DEEPL_API_KEY)".to_string(),
            ));
        }

        let target = to_deepl_lang(target_lang.unwrap_or_default());
        if target.is_empty() {
            return Err(ProviderError::InvalidRequest(
                "targetLang is required".to_string(),
            ));
        }

        let source = to_deepl_lang(source_lang.unwrap_or_default());
        let body = TranslateRequest {
            text: vec![text],
            target_lang: &target,
            source_lang: (!source.is_empty()).then_some(source.as_str()),
        };

        let url = format!("{}/translate", base_url.trim_end_matches('/'));

        let start = Instant::now();
        let result = self.send(&url, api_key, &body).await;

        PROVIDER_REQUEST_DURATION
            .with_label_values(&[self.name()])
            .observe(start.elapsed().as_secs_f64());
        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.label(),
        };
        PROVIDER_REQUESTS
            .with_label_values(&[self.name(), outcome])
            .inc();

        result
    }
}

/// Normalize a language tag the way DeepL expects it: trimmed and upper-cased.
/// Blank input yields an empty string.
pub fn to_deepl_lang(lang: &str) -> String {
    lang.trim().to_uppercase()
}

/// Cut `body` to at most `max_chars` characters, appending "..." when cut.
pub fn truncate_snippet(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &body[..byte_idx]),
        None => body.to_string(),
    }
}

/// Pull `translations[0].text` out of a provider response body.
pub fn extract_translation(body: &str) -> Result<String, ProviderError> {
    let parsed: TranslateResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::Parse(format!("invalid response JSON: {}", e))
    })?;

    let first = parsed
        .translations
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Parse("response missing translations".to_string()))?;

    first.text.ok_or_else(|| {
        ProviderError::Parse("response missing translations[0].text".to_string())
    })
}
