use crate::domain::error::LingoError;
use crate::domain::model::CacheKey;
use crate::domain::traits::TranslationBackend;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

struct QueueItem {
    key: CacheKey,
    done: oneshot::Sender<Result<String, LingoError>>,
}

/// Single-lane FIFO request queue with a minimum inter-dispatch interval.
///
/// A spawned drain task is the only consumer; it pops items in submission
/// order and never lets two dispatches start closer together than
/// `min_interval`, so queue depth stretches completion latency, not the
/// outbound burst rate. Pacing is measured dispatch-to-dispatch: the clock
/// is read when a request is issued, not when its response lands.
pub struct RequestQueue {
    tx: mpsc::UnboundedSender<QueueItem>,
}

impl RequestQueue {
    /// Spawn the drain loop. It idles on an empty channel and wakes on the
    /// next enqueue; dropping the queue (all senders) terminates it.
    pub fn start(backend: Arc<dyn TranslationBackend>, min_interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(drain_loop(rx, backend, min_interval));
        Self { tx }
    }

    /// Append a request; the receiver resolves with the backend's verbatim
    /// result once the item reaches the head of the line and the pacing
    /// window opens.
    pub fn enqueue(&self, key: CacheKey) -> oneshot::Receiver<Result<String, LingoError>> {
        let (done, rx) = oneshot::channel();
        if let Err(e) = self.tx.send(QueueItem { key, done }) {
            // Drain task is gone; the caller sees a closed channel and
            // falls open to the original text.
            warn!("translation queue closed: {}", e);
        }
        rx
    }
}

async fn drain_loop(
    mut rx: mpsc::UnboundedReceiver<QueueItem>,
    backend: Arc<dyn TranslationBackend>,
    min_interval: Duration,
) {
    let mut last_dispatch: Option<Instant> = None;

    while let Some(item) = rx.recv().await {
        if let Some(prev) = last_dispatch {
            let elapsed = prev.elapsed();
            if elapsed < min_interval {
                tokio::time::sleep(min_interval - elapsed).await;
            }
        }
        last_dispatch = Some(Instant::now());

        let request_id = Uuid::new_v4();
        debug!(
            %request_id,
            text = %item.key.text,
            language = %item.key.language,
            "dispatching translation request"
        );

        let result = backend
            .fetch_translation(&item.key.text, &item.key.language)
            .await;
        if let Err(e) = &result {
            warn!(%request_id, error = %e, "translation request failed");
        }

        // Receiver may have been dropped; the work is still done.
        let _ = item.done.send(result);
    }
}
