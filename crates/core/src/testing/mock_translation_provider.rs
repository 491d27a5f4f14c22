//! Mock translation provider for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::translator::{ProviderError, TranslationProvider};

/// A recorded provider call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTranslation {
    pub text: String,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
}

#[derive(Debug, Clone)]
enum Behavior {
    Echo,
    Translate(String),
    Fail(ProviderError),
}

/// Mock implementation of the TranslationProvider trait.
///
/// Provides controllable behavior for testing:
/// - Return a fixed translation, or fail with a given error
/// - Fail only the next call
/// - Simulate provider latency
/// - Record every call for assertions
///
/// # Example
///
/// ```rust,ignore
/// use parlance_core::testing::MockTranslationProvider;
///
/// let provider = MockTranslationProvider::new();
/// provider.set_translation("Olá").await;
///
/// let text = provider.translate("Hello", Some("en"), Some("pt")).await?;
/// assert_eq!(provider.call_count().await, 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockTranslationProvider {
    calls: Arc<RwLock<Vec<RecordedTranslation>>>,
    behavior: Arc<RwLock<Behavior>>,
    next_error: Arc<RwLock<Option<ProviderError>>>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl Default for MockTranslationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranslationProvider {
    /// Create a mock that echoes the input text upper-cased.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(RwLock::new(Vec::new())),
            behavior: Arc::new(RwLock::new(Behavior::Echo)),
            next_error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
        }
    }

    /// Return `text` from every subsequent call.
    pub async fn set_translation(&self, text: impl Into<String>) {
        *self.behavior.write().await = Behavior::Translate(text.into());
    }

    /// Fail every subsequent call with `error`.
    pub async fn set_failure(&self, error: ProviderError) {
        *self.behavior.write().await = Behavior::Fail(error);
    }

    /// Fail only the next call with `error`.
    pub async fn set_next_error(&self, error: ProviderError) {
        *self.next_error.write().await = Some(error);
    }

    /// Sleep this long inside each call.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// All calls made so far.
    pub async fn recorded_calls(&self) -> Vec<RecordedTranslation> {
        self.calls.read().await.clone()
    }

    /// Number of calls made so far.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl TranslationProvider for MockTranslationProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: Option<&str>,
    ) -> Result<String, ProviderError> {
        self.calls.write().await.push(RecordedTranslation {
            text: text.to_string(),
            source_lang: source_lang.map(str::to_string),
            target_lang: target_lang.map(str::to_string),
        });

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        match &*self.behavior.read().await {
            Behavior::Echo => Ok(text.to_uppercase()),
            Behavior::Translate(result) => Ok(result.clone()),
            Behavior::Fail(error) => Err(error.clone()),
        }
    }
}
