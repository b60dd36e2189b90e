//! Cache Store Module
//!
//! Key/value storage for raw response bodies with age-based eviction.
//!
//! The store is a plain synchronous structure. Callers share it behind a
//! single exclusive lock (see [`Cache`](crate::cache::Cache)), which makes
//! `add`, `get` and `reap` mutually exclusive critical sections.

use std::collections::HashMap;

use tokio::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Map of request keys to cached payloads.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Activity counters
    stats: CacheStats,
    /// Maximum age an entry may reach before a sweep removes it
    interval: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries expire after `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    // == Add ==
    /// Stores `value` under `key`, stamped with the current instant.
    ///
    /// An existing entry for `key` is replaced, timestamp included.
    pub fn add(&mut self, key: String, value: Vec<u8>) {
        self.add_at(key, value, Instant::now());
    }

    pub(crate) fn add_at(&mut self, key: String, value: Vec<u8>, now: Instant) {
        self.entries
            .insert(key, CacheEntry::with_timestamp(value, now));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns a copy of the payload stored under `key`.
    ///
    /// Age is not checked here: an entry past its interval stays readable
    /// until the next sweep removes it.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value().to_vec())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Reap ==
    /// Removes every entry older than the interval.
    ///
    /// Returns the number of entries removed.
    pub fn reap(&mut self) -> usize {
        self.reap_at(Instant::now())
    }

    pub(crate) fn reap_at(&mut self, now: Instant) -> usize {
        let interval = self.interval;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.is_expired(now, interval));

        let removed = before - self.entries.len();
        self.stats.record_reaped(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    /// Notes that a caller could not decode a payload returned by `get`.
    pub fn record_corrupt_hit(&mut self) {
        self.stats.record_corrupt_hit();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
