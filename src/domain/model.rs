use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Source language of all translatable text. Cache keys always translate
/// *from* this language, never into it.
pub const SOURCE_LANGUAGE: &str = "en";

// Identifies one translatable unit: exact string match on both parts,
// no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub text: String,
    pub language: String,
}

impl CacheKey {
    pub fn new(text: &str, language: &str) -> Self {
        Self {
            text: text.to_string(),
            language: language.to_string(),
        }
    }
}

/// One entry of the supported-language registry shown by `--languages`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
}

// Descriptive metadata only; not part of the pipeline's correctness.
pub static SUPPORTED_LANGUAGES: Lazy<Vec<LanguageOption>> = Lazy::new(|| {
    [
        ("ar", "Arabic"),
        ("de", "German"),
        ("es", "Spanish"),
        ("fr", "French"),
        ("hi", "Hindi"),
        ("it", "Italian"),
        ("ja", "Japanese"),
        ("ko", "Korean"),
        ("nl", "Dutch"),
        ("pl", "Polish"),
        ("pt", "Portuguese"),
        ("ru", "Russian"),
        ("sv", "Swedish"),
        ("tr", "Turkish"),
        ("uk", "Ukrainian"),
        ("vi", "Vietnamese"),
        ("zh", "Chinese"),
    ]
    .into_iter()
    .map(|(code, name)| LanguageOption { code, name })
    .collect()
});

/// True for the source language and for every registry entry.
pub fn is_supported(code: &str) -> bool {
    code == SOURCE_LANGUAGE || SUPPORTED_LANGUAGES.iter().any(|l| l.code == code)
}

pub fn language_name(code: &str) -> Option<&'static str> {
    if code == SOURCE_LANGUAGE {
        return Some("English");
    }
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .map(|l| l.name)
}

// 翻译结果来源
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TranslationOrigin {
    LocalCache,
    Online,
    Passthrough,
}

// CLI-facing translation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationReport {
    pub source_text: String,
    pub translated_text: String,
    pub language: String,
    pub origin: TranslationOrigin,
    /// False when the provider fell back to (or legitimately returned)
    /// the original text.
    pub changed: bool,
}
