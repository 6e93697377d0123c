//! Cache Module
//!
//! Fixed-capacity key-value cache with O(1) least-recently-used eviction.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::{NodeId, RecencyList};
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::LruCache;
