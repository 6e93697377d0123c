//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a simple reference model.

use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};

use crate::cache::{LruCache, SharedCache};

// == Strategies ==
/// Small key space so that overwrites, hits and evictions all happen often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-j]".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

// == Reference Model ==
/// Linear-scan LRU used as the oracle. Front is most recently used.
struct ModelCache {
    capacity: usize,
    entries: VecDeque<(String, String)>,
}

impl ModelCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        let entry = self.entries.remove(pos)?;
        let value = entry.1.clone();
        self.entries.push_front(entry);
        Some(value)
    }

    fn put(&mut self, key: String, value: String) -> Option<String> {
        let mut evicted = None;
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.remove(pos);
        } else if self.entries.len() >= self.capacity {
            evicted = self.entries.pop_back().map(|(k, _)| k);
        }
        self.entries.push_front((key, value));
        evicted
    }

    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every get result, the full MRU-to-LRU order, and the index/list
    // correspondence match the reference model after each operation.
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let mut store = LruCache::new(capacity).unwrap();
        let mut model = ModelCache::new(capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    store.put(key.clone(), value.clone());
                    model.put(key, value);
                }
                CacheOp::Get { key } => {
                    let actual = store.get(&key).cloned();
                    let expected = model.get(&key);
                    prop_assert_eq!(actual, expected, "get({}) diverged", key);
                }
            }

            let keys: Vec<String> = store.keys().cloned().collect();
            prop_assert_eq!(keys, model.keys());
            prop_assert!(store.check_invariants().is_ok(), "{:?}", store.check_invariants());
        }
    }

    // The cache never holds more than its capacity, at any step.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..20,
        entries in prop::collection::vec(("[a-z]{1,4}", value_strategy()), 1..200)
    ) {
        let mut store = LruCache::new(capacity).unwrap();

        for (key, value) in entries {
            store.put(key, value);
            prop_assert!(
                store.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                store.len(),
                capacity
            );
        }
    }

    // Writing v1 then v2 to the same key keeps one entry holding v2.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = LruCache::new(4).unwrap();

        store.put(key.clone(), value1);
        let len_before = store.len();
        store.put(key.clone(), value2.clone());

        prop_assert_eq!(store.len(), len_before);
        prop_assert_eq!(store.get(&key).cloned(), Some(value2));
    }

    // Once full, the key whose last access is oldest is evicted first and the
    // most recently accessed key is evicted last.
    #[test]
    fn prop_eviction_follows_access_order(
        keys in prop::collection::hash_set("[a-z]{2,6}", 2..10),
        touches in prop::collection::vec(any::<prop::sample::Index>(), 0..20)
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let capacity = keys.len();
        let mut store = LruCache::new(capacity).unwrap();
        let mut access_order: Vec<String> = Vec::new();

        for key in &keys {
            store.put(key.clone(), format!("value_{}", key));
            access_order.retain(|k| k != key);
            access_order.push(key.clone());
        }
        for index in touches {
            let key = index.get(&keys).clone();
            prop_assert!(store.get(&key).is_some());
            access_order.retain(|k| *k != key);
            access_order.push(key);
        }

        // Inserting fresh keys (uppercase, disjoint from the originals)
        // evicts in exactly least-recent-first order.
        for (i, expected) in access_order.iter().enumerate() {
            prop_assert_eq!(store.peek_lru().map(|(k, _)| k.clone()), Some(expected.clone()));
            store.put(format!("NEW{}", i), "x".to_string());
            prop_assert!(!store.contains(expected.as_str()));
            prop_assert_eq!(store.len(), capacity);
        }
        prop_assert_eq!(store.stats().evictions, capacity as u64);
    }

    // Misses, for never-inserted or evicted keys, change nothing but the
    // miss counter.
    #[test]
    fn prop_idempotent_miss(
        keys in prop::collection::hash_set("[a-z]{2,6}", 1..8),
        probes in 1usize..5
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let mut store = LruCache::new(keys.len()).unwrap();
        for key in &keys {
            store.put(key.clone(), key.to_uppercase());
        }
        let evicted = keys[0].clone();
        store.put("0".to_string(), "zero".to_string());

        let order_before: Vec<String> = store.keys().cloned().collect();
        let misses_before = store.stats().misses;

        for _ in 0..probes {
            prop_assert!(store.get("never-inserted-key").is_none());
            prop_assert!(store.get(&evicted).is_none());
        }

        let order_after: Vec<String> = store.keys().cloned().collect();
        prop_assert_eq!(order_before, order_after);
        prop_assert_eq!(store.stats().misses, misses_before + 2 * probes as u64);
    }

    // Hit and miss counters reflect exactly the lookups performed.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut store = LruCache::new(3).unwrap();
        let mut model = ModelCache::new(3);
        let (mut hits, mut misses, mut evictions) = (0u64, 0u64, 0u64);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    store.put(key.clone(), value.clone());
                    if model.put(key, value).is_some() {
                        evictions += 1;
                    }
                }
                CacheOp::Get { key } => {
                    let expected = model.get(&key);
                    let actual = store.get(&key).cloned();
                    prop_assert_eq!(&actual, &expected, "get({}) diverged", key);
                    match actual {
                        Some(_) => hits += 1,
                        None => misses += 1,
                    }
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.misses, misses);
        prop_assert_eq!(stats.evictions, evictions);
        prop_assert_eq!(stats.total_entries, store.len());
    }
}

// == Regression Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    // A hit re-orders recency, which changes which key a later put evicts.
    #[test]
    fn test_eviction_count_after_hit() {
        let mut store = LruCache::new(3).unwrap();
        let mut model = ModelCache::new(3);
        let mut evictions = 0u64;

        for (key, is_get) in [
            ("j", false),
            ("b", false),
            ("j", true),
            ("a", false),
            ("c", false),
            ("b", false),
        ] {
            if is_get {
                assert_eq!(store.get(key).cloned(), model.get(key));
            } else {
                store.put(key.to_string(), "v".to_string());
                if model.put(key.to_string(), "v".to_string()).is_some() {
                    evictions += 1;
                }
            }
        }

        assert_eq!(evictions, 2);
        assert_eq!(store.stats().evictions, evictions);
        let keys: Vec<String> = store.keys().cloned().collect();
        assert_eq!(keys, model.keys());
        assert_eq!(keys, vec!["b", "c", "a"]);
    }
}

// == Property Test for Concurrent Operation Correctness ==
proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    // Concurrent puts and gets never break capacity or the index/list
    // correspondence, and every value read was written for that key.
    #[test]
    fn prop_concurrent_operation_correctness(
        capacity in 1usize..8,
        operations in prop::collection::vec(cache_op_strategy(), 10..60)
    ) {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .build()
            .unwrap();

        rt.block_on(async {
            let cache: SharedCache<String, String> = SharedCache::new(capacity).unwrap();
            let written: HashSet<(String, String)> = operations
                .iter()
                .filter_map(|op| match op {
                    CacheOp::Put { key, value } => Some((key.clone(), value.clone())),
                    CacheOp::Get { .. } => None,
                })
                .collect();

            let mut handles = Vec::new();
            for op in operations {
                let cache = cache.clone();
                handles.push(tokio::spawn(async move {
                    match op {
                        CacheOp::Put { key, value } => {
                            cache.put(key, value).await;
                            None
                        }
                        CacheOp::Get { key } => cache.get(&key).await.map(|value| (key, value)),
                    }
                }));
            }

            for handle in handles {
                let read = handle.await.expect("Task should not panic");
                if let Some(pair) = read {
                    prop_assert!(written.contains(&pair), "read {:?} was never written", pair);
                }
            }

            prop_assert!(cache.len().await <= capacity);
            let invariants = cache.check_invariants().await;
            prop_assert!(invariants.is_ok(), "{:?}", invariants);
            Ok(())
        })?;
    }
}
