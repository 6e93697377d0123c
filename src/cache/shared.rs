//! Shared Cache Module
//!
//! Thread-safe handle over an [`LruCache`] for use from concurrent request
//! handlers.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::{CacheStats, LruCache};
use crate::error::Result;

// == Shared Cache ==
/// Cloneable handle to one cache instance.
///
/// Every call takes the lock exactly once and never awaits while holding it,
/// so each `get` or `put` is applied entirely or not at all. A caller dropped
/// while waiting for the lock leaves the cache untouched.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates a shared cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity)?)),
        })
    }

    /// Returns a copy of the value for `key`, promoting it to most recently used.
    ///
    /// The clone happens under the lock, so `V` should be cheap to clone
    /// (`Arc<str>`, `Arc<[u8]>`) when values can be large.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let mut cache = self.inner.lock().await;
        cache.get(key).cloned()
    }

    /// Stores `value` under `key`, evicting the LRU entry if the cache is full.
    pub async fn put(&self, key: K, value: V) {
        let mut cache = self.inner.lock().await;
        cache.put(key, value);
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    #[cfg(test)]
    pub(crate) async fn check_invariants(&self) -> std::result::Result<(), String> {
        self.inner.lock().await.check_invariants()
    }
}
