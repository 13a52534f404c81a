//! SharedLruCache: thread-safe handle around an LruCache

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::capacity::Capacity;
use crate::error::Result;
use crate::lru::{Insertion, LruCache};
use crate::stats::CacheStats;

/// Cloneable, thread-safe LRU cache handle with usage statistics
///
/// Every operation, reads included, reorders recency, so all of them take the
/// same exclusive lock. Clones share the cache and its statistics.
pub struct SharedLruCache<K, V> {
    /// LRU cache guarded by a single lock
    cache: Arc<Mutex<LruCache<K, V>>>,

    /// Cache statistics
    stats: Arc<CacheStats>,
}

impl<K, V> Clone for SharedLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<K, V> SharedLruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new shared cache with the given capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries
    ///
    /// # Returns
    /// * `Result<SharedLruCache>` - Cache handle, or `InvalidCapacity` for 0
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::with_capacity(Capacity::new(capacity)?))
    }

    /// Create a new shared cache from an already validated capacity
    pub fn with_capacity(capacity: Capacity) -> Self {
        Self {
            cache: Arc::new(Mutex::new(LruCache::with_capacity(capacity))),
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Get a copy of a value, marking it most recently used
    ///
    /// # Returns
    /// * `Option<V>` - The cached value, or `None` on a miss
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let value = self.cache.lock().get(key).cloned();
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    /// Insert or update a value, marking it most recently used
    ///
    /// # Returns
    /// * `Option<V>` - The value previously stored under `key`, if any
    pub fn put(&self, key: K, value: V) -> Option<V> {
        let outcome = self.cache.lock().insert(key, value);
        match outcome {
            Insertion::Inserted => {
                self.stats.record_insert();
                None
            }
            Insertion::Replaced(old) => {
                self.stats.record_update();
                Some(old)
            }
            Insertion::Evicted { .. } => {
                self.stats.record_insert();
                self.stats.record_eviction();
                None
            }
        }
    }

    /// Get a copy of a value without changing its recency or the statistics
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.cache.lock().peek(key).cloned()
    }

    /// Check whether a key is cached, without changing its recency
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.lock().contains_key(key)
    }

    /// Copy out all entries from most to least recently used
    pub fn snapshot(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.cache
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Run a compound operation while holding the lock
    ///
    /// Operations performed through the closure are not counted in
    /// [`stats`](SharedLruCache::stats).
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut LruCache<K, V>) -> R) -> R {
        f(&mut self.cache.lock())
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current number of entries
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.lock().capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_shared_basic() {
        let cache = SharedLruCache::new(10).unwrap();

        cache.put(1, "test data".to_string());
        let data = cache.get(&1).unwrap();

        assert_eq!(data, "test data");
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 0);
        assert_eq!(cache.stats().inserts(), 1);
    }

    #[test]
    fn test_shared_eviction() {
        let cache = SharedLruCache::new(2).unwrap();

        cache.put(0, "data 0");
        cache.put(1, "data 1");
        assert_eq!(cache.len(), 2);

        cache.put(2, "data 2");

        // 0 was least recently used
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&0), None);
        assert_eq!(cache.get(&1), Some("data 1"));
        assert_eq!(cache.get(&2), Some("data 2"));
        assert_eq!(cache.stats().hits(), 2);
        assert_eq!(cache.stats().misses(), 1);
        assert_eq!(cache.stats().evictions(), 1);
    }

    #[test]
    fn test_shared_update() {
        let cache = SharedLruCache::new(2).unwrap();

        assert_eq!(cache.put("k", 1), None);
        assert_eq!(cache.put("k", 2), Some(1));

        assert_eq!(cache.stats().inserts(), 1);
        assert_eq!(cache.stats().updates(), 1);
        assert_eq!(cache.peek("k"), Some(2));
    }

    #[test]
    fn test_shared_peek_and_snapshot() {
        let cache = SharedLruCache::new(3).unwrap();

        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(3, 30);

        assert_eq!(cache.peek(&1), Some(10));
        assert!(cache.contains_key(&2));
        assert_eq!(cache.snapshot(), vec![(3, 30), (2, 20), (1, 10)]);
        assert_eq!(cache.stats().hits() + cache.stats().misses(), 0);
    }

    #[test]
    fn test_shared_with_lock() {
        let cache = SharedLruCache::new(2).unwrap();

        cache.put(1, 1);
        let lru = cache.with_lock(|inner| inner.peek_lru().map(|(k, _)| *k));

        assert_eq!(lru, Some(1));
        assert_eq!(cache.capacity(), 2);
    }

    #[test]
    fn test_shared_invalid_capacity() {
        assert!(SharedLruCache::<u32, u32>::new(0).is_err());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = SharedLruCache::new(64).unwrap();

        let workers: Vec<_> = (0..4u64)
            .map(|worker| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..1000u64 {
                        let key = worker * 1000 + i;
                        cache.put(key, i);
                        cache.get(&key);
                        assert!(cache.len() <= 64);
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(cache.len(), 64);
        assert_eq!(cache.stats().inserts(), 4000);
        assert_eq!(cache.stats().evictions(), 4000 - 64);
    }
}
