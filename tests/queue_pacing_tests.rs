//! Outbound pacing tests: the queue must never let two dispatches start
//! closer together than the configured interval, in FIFO order, no matter
//! how large the burst.

use async_trait::async_trait;
use lingo::application::queue::RequestQueue;
use lingo::application::service::TranslationService;
use lingo::domain::error::LingoError;
use lingo::domain::model::CacheKey;
use lingo::domain::traits::{PreferenceStore, TranslationBackend};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

const INTERVAL: Duration = Duration::from_millis(2000);

struct RecordingBackend {
    dispatches: Mutex<Vec<(String, Instant)>>,
}

impl RecordingBackend {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            dispatches: Mutex::new(Vec::new()),
        })
    }

    fn recorded(&self) -> Vec<(String, Instant)> {
        self.dispatches.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationBackend for RecordingBackend {
    async fn fetch_translation(&self, text: &str, language: &str) -> Result<String, LingoError> {
        self.dispatches
            .lock()
            .unwrap()
            .push((text.to_string(), Instant::now()));
        Ok(format!("{} [{}]", text, language))
    }
}

struct NullStore;

#[async_trait]
impl PreferenceStore for NullStore {
    async fn load_language(&self) -> Result<Option<String>, LingoError> {
        Ok(None)
    }

    async fn save_language(&self, _code: &str) -> Result<(), LingoError> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn burst_of_ten_never_exceeds_the_rate_ceiling() {
    let backend = RecordingBackend::new();
    let queue = RequestQueue::start(backend.clone(), INTERVAL);

    let keys: Vec<String> = (0..10).map(|i| format!("text-{}", i)).collect();
    let receivers: Vec<_> = keys
        .iter()
        .map(|text| queue.enqueue(CacheKey::new(text, "es")))
        .collect();

    for rx in receivers {
        rx.await.unwrap().unwrap();
    }

    let dispatches = backend.recorded();
    assert_eq!(dispatches.len(), 10);

    // FIFO: dispatch order equals enqueue order.
    let order: Vec<_> = dispatches.iter().map(|(text, _)| text.clone()).collect();
    assert_eq!(order, keys);

    // Aggregate ceiling: 1st to 10th dispatch spans at least 9 intervals.
    let span = dispatches[9].1 - dispatches[0].1;
    assert!(span >= INTERVAL * 9, "span was {:?}", span);

    // And no adjacent pair is closer than one interval.
    for pair in dispatches.windows(2) {
        assert!(pair[1].1 - pair[0].1 >= INTERVAL);
    }
}

#[tokio::test(start_paused = true)]
async fn pacing_applies_through_the_facade() {
    let backend = RecordingBackend::new();
    let service = TranslationService::new(
        backend.clone(),
        Arc::new(NullStore),
        INTERVAL,
        "es".to_string(),
    );

    let (a, b, c) = tokio::join!(
        service.translate("A"),
        service.translate("B"),
        service.translate("C"),
    );
    assert_eq!((a.as_str(), b.as_str(), c.as_str()), ("A [es]", "B [es]", "C [es]"));

    let dispatches = backend.recorded();
    let t0 = dispatches[0].1;
    assert_eq!(dispatches[1].1 - t0, INTERVAL);
    assert_eq!(dispatches[2].1 - t0, INTERVAL * 2);
}

#[tokio::test(start_paused = true)]
async fn pacing_is_global_across_languages() {
    let backend = RecordingBackend::new();
    let queue = RequestQueue::start(backend.clone(), INTERVAL);

    let first = queue.enqueue(CacheKey::new("Hello", "es"));
    let second = queue.enqueue(CacheKey::new("Hello", "fr"));
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    let dispatches = backend.recorded();
    // One shared clock, not one per key or per language.
    assert_eq!(dispatches[1].1 - dispatches[0].1, INTERVAL);
}
