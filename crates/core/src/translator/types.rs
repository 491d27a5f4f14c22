//! DeepL wire types.

use serde::{Deserialize, Serialize};

/// Body of `POST <base>/translate`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranslateRequest<'a> {
    pub text: Vec<&'a str>,
    pub target_lang: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<&'a str>,
}

/// Response envelope. Fields are optional so that a missing array can be
/// reported precisely instead of as a generic decode error.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TranslateResponse {
    #[serde(default)]
    pub translations: Option<Vec<TranslationEntry>>,
}

/// One entry of `translations`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TranslationEntry {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub detected_source_language: Option<String>,
}
