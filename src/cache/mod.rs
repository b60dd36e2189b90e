//! Cache Module
//!
//! In-memory store of raw response bodies with age-based eviction.

mod entry;
mod expiring;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use expiring::{Cache, MIN_INTERVAL};
pub use stats::CacheStats;
pub use store::CacheStore;
