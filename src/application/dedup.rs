use crate::domain::model::CacheKey;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;

/// Outcome of [`InFlightTable::reserve`].
pub enum Reservation {
    /// No request was outstanding for the key. The caller now owns the
    /// dispatch and must call [`InFlightTable::complete`] when it finishes,
    /// on the failure path too.
    Owner,
    /// A request is already outstanding; await the receiver for its result.
    Attached(oneshot::Receiver<String>),
}

/// Tracks in-flight `(text, language)` keys so concurrent callers share one
/// outbound call instead of issuing duplicates.
///
/// Invariant: at most one pending entry per key. The entry is removed by
/// `complete` regardless of how the dispatch went, so a key that failed
/// once is free to be requested again.
pub struct InFlightTable {
    pending: Mutex<HashMap<CacheKey, Vec<oneshot::Sender<String>>>>,
}

impl InFlightTable {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn reserve(&self, key: &CacheKey) -> Reservation {
        let mut pending = self.pending.lock().unwrap();
        match pending.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                let (tx, rx) = oneshot::channel();
                entry.get_mut().push(tx);
                Reservation::Attached(rx)
            }
            Entry::Vacant(entry) => {
                entry.insert(Vec::new());
                Reservation::Owner
            }
        }
    }

    /// Clear the key's entry and hand `value` to every attached waiter.
    /// Waiters that gave up are skipped silently.
    pub fn complete(&self, key: &CacheKey, value: &str) {
        let waiters = self
            .pending
            .lock()
            .unwrap()
            .remove(key)
            .unwrap_or_default();

        for tx in waiters {
            let _ = tx.send(value.to_string());
        }
    }

    /// Number of keys with an outstanding dispatch.
    pub fn len(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InFlightTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(text: &str) -> CacheKey {
        CacheKey::new(text, "es")
    }

    #[test]
    fn first_reserve_owns_the_dispatch() {
        let table = InFlightTable::new();
        assert!(matches!(table.reserve(&key("Hello")), Reservation::Owner));
        assert_eq!(table.len(), 1);
        // A different key gets its own dispatch.
        assert!(matches!(table.reserve(&key("Bye")), Reservation::Owner));
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn later_reserves_attach_and_receive_the_result() {
        let table = InFlightTable::new();
        assert!(matches!(table.reserve(&key("Hello")), Reservation::Owner));

        let Reservation::Attached(first) = table.reserve(&key("Hello")) else {
            panic!("expected attached reservation");
        };
        let Reservation::Attached(second) = table.reserve(&key("Hello")) else {
            panic!("expected attached reservation");
        };

        table.complete(&key("Hello"), "Hola");
        assert_eq!(first.await.unwrap(), "Hola");
        assert_eq!(second.await.unwrap(), "Hola");
        assert!(table.is_empty());
    }

    #[test]
    fn complete_frees_the_key_for_a_new_dispatch() {
        let table = InFlightTable::new();
        assert!(matches!(table.reserve(&key("Hello")), Reservation::Owner));
        table.complete(&key("Hello"), "Hola");

        // Not permanently deduplicated: the next caller owns a fresh call.
        assert!(matches!(table.reserve(&key("Hello")), Reservation::Owner));
    }

    #[test]
    fn dropped_waiters_are_tolerated() {
        let table = InFlightTable::new();
        assert!(matches!(table.reserve(&key("Hello")), Reservation::Owner));
        let reservation = table.reserve(&key("Hello"));
        drop(reservation);

        // Must not panic even though the waiter went away.
        table.complete(&key("Hello"), "Hola");
        assert!(table.is_empty());
    }
}
