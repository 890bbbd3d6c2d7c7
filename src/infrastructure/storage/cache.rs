// In-memory translation cache backed by DashMap
use crate::domain::model::CacheKey;
use dashmap::DashMap;
use tokio::sync::watch;

/// Session-lifetime `(text, language) -> translation` map.
///
/// Entries are never evicted; the translatable vocabulary is small and
/// finite, and the cache dies with the process. Every effective write
/// bumps a generation counter published over a watch channel so callers
/// relying on the synchronous [`get`](Self::get) can observe that content
/// changed.
pub struct TranslationCache {
    map: DashMap<CacheKey, String>,
    generation: watch::Sender<u64>,
}

impl TranslationCache {
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            map: DashMap::new(),
            generation,
        }
    }

    /// Pure synchronous lookup; never performs I/O.
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    /// Insert a translation. Re-putting the identical value is a no-op
    /// and does not bump the generation; a differing value wins
    /// (last-write-wins) and does.
    pub fn put(&self, key: CacheKey, value: String) {
        let unchanged = self
            .map
            .get(&key)
            .is_some_and(|entry| *entry.value() == value);
        if unchanged {
            return;
        }

        self.map.insert(key, value);
        self.generation.send_modify(|g| *g += 1);
    }

    /// Current generation; increases monotonically with each effective put.
    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// Receiver that resolves whenever the cache content changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&self) {
        self.map.clear();
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(text: &str, language: &str) -> CacheKey {
        CacheKey::new(text, language)
    }

    #[test]
    fn put_then_get_round_trips() {
        let cache = TranslationCache::new();
        assert!(cache.get(&key("Hello", "es")).is_none());

        cache.put(key("Hello", "es"), "Hola".to_string());
        assert_eq!(cache.get(&key("Hello", "es")).as_deref(), Some("Hola"));
        // Same text under a different language is a distinct entry.
        assert!(cache.get(&key("Hello", "fr")).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn identical_put_is_a_noop() {
        let cache = TranslationCache::new();
        cache.put(key("Hello", "es"), "Hola".to_string());
        let generation = cache.generation();

        cache.put(key("Hello", "es"), "Hola".to_string());
        assert_eq!(cache.generation(), generation);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn differing_put_wins_and_bumps_generation() {
        let cache = TranslationCache::new();
        cache.put(key("Hello", "es"), "Hola".to_string());
        let generation = cache.generation();

        cache.put(key("Hello", "es"), "Buenas".to_string());
        assert_eq!(cache.get(&key("Hello", "es")).as_deref(), Some("Buenas"));
        assert_eq!(cache.generation(), generation + 1);
    }

    #[tokio::test]
    async fn subscribers_observe_writes() {
        let cache = TranslationCache::new();
        let mut rx = cache.subscribe();

        cache.put(key("Hello", "es"), "Hola".to_string());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);
    }

    #[test]
    fn clear_empties_the_map() {
        let cache = TranslationCache::new();
        cache.put(key("Hello", "es"), "Hola".to_string());
        cache.put(key("Bye", "es"), "Adiós".to_string());
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}
