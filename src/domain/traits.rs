use crate::domain::error::LingoError;
use async_trait::async_trait;

/// Trait for translation providers
///
/// Abstracts the outbound HTTP call so providers can be swapped and tests
/// can substitute a scripted backend. The returned `Result` is strict:
/// converting a failure into "show the original text" is the façade's job,
/// not the provider's.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Fetch the translation of `text` into the target language.
    async fn fetch_translation(&self, text: &str, language: &str) -> Result<String, LingoError>;
}

/// Trait for the durable language-preference store
///
/// Read once at service initialization, written on every preference
/// change.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// The persisted target-language code, if one was ever saved.
    async fn load_language(&self) -> Result<Option<String>, LingoError>;

    /// Persist the target-language code.
    async fn save_language(&self, code: &str) -> Result<(), LingoError>;
}
