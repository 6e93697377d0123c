//! Cache Store Module
//!
//! Main cache engine: a key index over a recency list, giving O(1) `get` and
//! `put` with exact least-recently-used eviction.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::lru::{NodeId, RecencyList};
use crate::cache::{CacheEntry, CacheStats};
use crate::error::{CacheError, Result};

/// Upper bound on slots reserved up front; larger caches grow on demand.
const PREALLOCATE_LIMIT: usize = 1024;

// == LRU Cache ==
/// Fixed-capacity key-value cache with least-recently-used eviction.
///
/// The index maps each held key to its node in the recency list, so promotion
/// and eviction never search the list. The two structures always hold exactly
/// the same set of keys.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key to list node
    index: HashMap<K, NodeId>,
    /// Entries ordered MRU (front) to LRU (back)
    order: RecencyList<K, V>,
    /// Lookup and eviction counters
    stats: CacheStats,
    /// Maximum number of entries, fixed at construction
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        let reserved = capacity.min(PREALLOCATE_LIMIT);
        Ok(Self {
            index: HashMap::with_capacity(reserved),
            order: RecencyList::with_capacity(reserved),
            stats: CacheStats::new(capacity),
            capacity,
        })
    }

    // == Get ==
    /// Returns the value held for `key` and promotes it to most recently used.
    ///
    /// A miss returns `None` and leaves the recency order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        self.stats.record_hit();
        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    // == Put ==
    /// Stores `value` under `key` and promotes the key to most recently used.
    ///
    /// - An existing key has its value replaced; size is unchanged.
    /// - A new key at full capacity first evicts exactly one entry, the LRU one.
    /// - A new key below capacity is inserted directly.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(id) {
                entry.replace_value(value);
            }
            self.order.move_to_front(id);
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let id = self.order.push_front(CacheEntry::new(key.clone(), value));
        self.index.insert(key, id);
    }

    // == Evict ==
    /// Drops the least recently used entry, if any.
    fn evict_lru(&mut self) {
        if let Some(evicted) = self.order.pop_back() {
            self.index.remove(&evicted.key);
            self.stats.record_eviction();
        }
    }

    // == Read-only Accessors ==
    /// Returns the value for `key` without changing its recency or the stats.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .and_then(|&id| self.order.get(id))
            .map(|entry| &entry.value)
    }

    /// Returns the next eviction candidate.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.back().map(|entry| (&entry.key, &entry.value))
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Iterates held keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter().map(|entry| &entry.key)
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Stats ==
    /// Returns a snapshot of the counters with the current entry count.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.index.len();
        stats
    }

    // == Invariants ==
    /// Verifies that index and list agree and capacity holds.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> std::result::Result<(), String> {
        use std::collections::HashSet;

        if self.index.len() > self.capacity {
            return Err(format!(
                "size {} exceeds capacity {}",
                self.index.len(),
                self.capacity
            ));
        }
        if self.index.len() != self.order.len() {
            return Err(format!(
                "index holds {} keys but list holds {}",
                self.index.len(),
                self.order.len()
            ));
        }

        let mut seen = HashSet::with_capacity(self.order.len());
        for entry in self.order.iter() {
            if !seen.insert(&entry.key) {
                return Err("duplicate key in recency list".to_string());
            }
            let Some(&id) = self.index.get(&entry.key) else {
                return Err("list key missing from index".to_string());
            };
            if self.order.get(id).map(|e| &e.key) != Some(&entry.key) {
                return Err("index points at the wrong node".to_string());
            }
        }
        if seen.len() != self.order.len() {
            return Err("list iteration length disagrees with len".to_string());
        }
        Ok(())
    }
}
