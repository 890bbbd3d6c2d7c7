use crate::application::dedup::{InFlightTable, Reservation};
use crate::application::queue::RequestQueue;
use crate::domain::error::LingoError;
use crate::domain::model::{is_supported, CacheKey, SOURCE_LANGUAGE};
use crate::domain::traits::{PreferenceStore, TranslationBackend};
use crate::infrastructure::storage::cache::TranslationCache;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Public façade of the translation pipeline.
///
/// Owns the session cache, the in-flight table and the paced request
/// queue; all access goes through here. Translation never fails from the
/// caller's point of view: provider errors degrade to the original text.
pub struct TranslationService {
    cache: TranslationCache,
    in_flight: InFlightTable,
    queue: RequestQueue,
    current_language: RwLock<String>,
    store: Arc<dyn PreferenceStore>,
}

impl TranslationService {
    /// Build the pipeline and spawn its drain loop. `initial_language`
    /// comes from the preference store (or the environment fallback) and
    /// is only changed by [`set_language`](Self::set_language).
    pub fn new(
        backend: Arc<dyn TranslationBackend>,
        store: Arc<dyn PreferenceStore>,
        min_interval: Duration,
        initial_language: String,
    ) -> Self {
        Self {
            cache: TranslationCache::new(),
            in_flight: InFlightTable::new(),
            queue: RequestQueue::start(backend, min_interval),
            current_language: RwLock::new(initial_language),
            store,
        }
    }

    /// Synchronous lookup for render paths: the cached translation of
    /// `text` into the current language, or `text` unchanged. Never
    /// triggers network I/O.
    pub fn lookup(&self, text: &str) -> String {
        let language = self.current_language();
        if language == SOURCE_LANGUAGE {
            return text.to_string();
        }
        self.cache
            .get(&CacheKey::new(text, &language))
            .unwrap_or_else(|| text.to_string())
    }

    /// Translate into the current language. Always fulfils; see
    /// [`translate_to`](Self::translate_to).
    pub async fn translate(&self, text: &str) -> String {
        let language = self.current_language();
        self.translate_to(text, &language).await
    }

    /// Translate `text` into `language`, consulting the cache, sharing any
    /// in-flight call for the same pair, and otherwise queueing one paced
    /// provider request. On provider failure the original text is
    /// returned and nothing is cached, so a later call gets a fresh
    /// attempt.
    pub async fn translate_to(&self, text: &str, language: &str) -> String {
        // Invalid input short-circuits before touching cache or queue.
        if text.trim().is_empty() || language == SOURCE_LANGUAGE {
            return text.to_string();
        }

        let key = CacheKey::new(text, language);
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        match self.in_flight.reserve(&key) {
            Reservation::Owner => {
                // A racing owner may have finished between the miss and
                // the reserve; recheck before paying for a dispatch.
                if let Some(hit) = self.cache.get(&key) {
                    self.in_flight.complete(&key, &hit);
                    return hit;
                }

                let rx = self.queue.enqueue(key.clone());
                let outcome = match rx.await {
                    Ok(result) => result,
                    Err(_) => Err(LingoError::Queue("drain loop terminated".to_string())),
                };

                match outcome {
                    Ok(translated) => {
                        self.cache.put(key.clone(), translated.clone());
                        self.in_flight.complete(&key, &translated);
                        translated
                    }
                    Err(_) => {
                        // Fail open: waiters and the owner all see the
                        // original text, and the key stays uncached so the
                        // next request retries.
                        self.in_flight.complete(&key, text);
                        text.to_string()
                    }
                }
            }
            Reservation::Attached(rx) => {
                debug!("attached to in-flight translation");
                rx.await.unwrap_or_else(|_| text.to_string())
            }
        }
    }

    /// Translate every value of `entries`, preserving keys. Entries are
    /// independent; the batch resolves once all of them have (each one
    /// fail-open on its own).
    pub async fn translate_batch(
        &self,
        entries: HashMap<String, String>,
    ) -> HashMap<String, String> {
        let language = self.current_language();
        let futures = entries.into_iter().map(|(name, text)| {
            let language = language.clone();
            async move {
                let translated = self.translate_to(&text, &language).await;
                (name, translated)
            }
        });
        futures_util::future::join_all(futures).await.into_iter().collect()
    }

    /// Change and persist the target language. The cache is left alone:
    /// entries are keyed by language, so earlier languages stay warm if
    /// the user switches back.
    pub async fn set_language(&self, code: &str) -> Result<(), LingoError> {
        if !is_supported(code) {
            return Err(LingoError::Config(format!(
                "Unsupported language code '{}' (see --languages)",
                code
            )));
        }

        *self.current_language.write().unwrap() = code.to_string();
        self.store.save_language(code).await
    }

    pub fn current_language(&self) -> String {
        self.current_language.read().unwrap().clone()
    }

    /// Cache probe for an explicit pair; `None` on miss, never I/O.
    pub fn cache_lookup(&self, key: &CacheKey) -> Option<String> {
        self.cache.get(key)
    }

    /// Cached entry count across all languages.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Monotonic counter bumped on every effective cache write.
    pub fn generation(&self) -> u64 {
        self.cache.generation()
    }

    /// Receiver resolving whenever the cache content changes; lets callers
    /// of the synchronous [`lookup`](Self::lookup) refresh themselves.
    pub fn subscribe_generation(&self) -> watch::Receiver<u64> {
        self.cache.subscribe()
    }

    /// Keys with an outstanding provider call.
    pub fn pending_requests(&self) -> usize {
        self.in_flight.len()
    }
}
