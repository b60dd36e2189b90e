//! Cache Entry Module
//!
//! Defines the immutable snapshot stored for each cached response.

use tokio::time::{Duration, Instant};

// == Cache Entry ==
/// A cached response body plus the instant it was inserted.
///
/// Entries are never mutated after insertion. Re-adding a key builds a fresh
/// entry, so both the payload and the timestamp are replaced together.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    value: Vec<u8>,
    created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self::with_timestamp(value, Instant::now())
    }

    /// Creates an entry stamped with an explicit instant.
    pub fn with_timestamp(value: Vec<u8>, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    /// The raw payload.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The insertion instant.
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    // == Age ==
    /// Time elapsed between insertion and `now`, saturating at zero.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `interval` at `now`.
    ///
    /// Boundary condition: an entry whose age is exactly `interval` is still
    /// live. Only a strictly greater age counts as expired.
    pub fn is_expired(&self, now: Instant, interval: Duration) -> bool {
        self.age(now) > interval
    }
}
