//! Cache Entry Module
//!
//! Defines the key/value record held by the cache.

// == Cache Entry ==
/// A single cached key-value pair.
///
/// The value is opaque to the cache: it is never inspected or copied, only
/// moved in on `put` and dropped on overwrite or eviction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    /// The key this entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new cache entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    // == Replace Value ==
    /// Swaps in a new value, returning the previous one.
    pub fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }
}
