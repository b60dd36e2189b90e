//! Expiring Cache
//!
//! Couples a [`CacheStore`] with its reaper task behind one exclusive lock.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::Duration;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::tasks::{spawn_reaper, ReaperHandle};

/// Smallest interval accepted; zero would make the reaper spin.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

// == Cache ==
/// Time-expiring cache of raw response bodies.
///
/// A single `interval` is both the maximum entry age and the reaper period,
/// so an entry may survive for up to twice the interval: inserted just after
/// a sweep, it is not yet expired at the next one and goes on the sweep after
/// that.
///
/// `add`, `get` and the reaper's sweep all run under the same mutex. The
/// reaper stops when [`Cache::shutdown`] is called or the cache is dropped.
#[derive(Debug)]
pub struct Cache {
    store: Arc<Mutex<CacheStore>>,
    reaper: ReaperHandle,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// An interval shorter than [`MIN_INTERVAL`] is raised to it.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn new(interval: Duration) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        let store = Arc::new(Mutex::new(CacheStore::new(interval)));
        let reaper = spawn_reaper(store.clone(), interval);

        Self { store, reaper }
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous entry.
    pub async fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        let value = value.into();
        debug!(key = %key, bytes = value.len(), "Cache add");

        self.store.lock().await.add(key, value);
    }

    // == Get ==
    /// Returns the payload stored under `key`, whatever its age.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let value = self.store.lock().await.get(key);
        debug!(key, hit = value.is_some(), "Cache get");
        value
    }

    // == Reap ==
    /// Runs one sweep immediately, outside the reaper's schedule.
    ///
    /// Returns the number of entries removed.
    pub async fn reap(&self) -> usize {
        self.store.lock().await.reap()
    }

    /// Notes that a payload returned by `get` could not be decoded.
    pub async fn record_corrupt_hit(&self) {
        self.store.lock().await.record_corrupt_hit();
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    pub async fn interval(&self) -> Duration {
        self.store.lock().await.interval()
    }

    /// Whether the reaper task is still running.
    pub fn is_reaping(&self) -> bool {
        !self.reaper.is_finished()
    }

    // == Shutdown ==
    /// Stops the reaper and waits for it to exit.
    pub async fn shutdown(self) {
        self.reaper.shutdown().await;
    }
}
