//! Testing utilities and mock implementations.
//!
//! Lets the workflow and the HTTP layer be exercised without contacting a
//! real translation provider.
//!
//! # Example
//!
//! ```rust,ignore
//! use parlance_core::testing::MockTranslationProvider;
//!
//! let provider = MockTranslationProvider::new();
//! provider.set_translation("Olá").await;
//! ```

mod mock_translation_provider;

pub use mock_translation_provider::{MockTranslationProvider, RecordedTranslation};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::workflow::CreateTicket;

    /// A create request with the given text and language pair.
    pub fn create_ticket(original_text: &str, source_lang: &str, target_lang: &str) -> CreateTicket {
        CreateTicket {
            original_text: original_text.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        }
    }

    /// A DeepL-shaped success body.
    pub fn deepl_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "translations": [
                { "detected_source_language": "EN", "text": text }
            ]
        })
    }
}
