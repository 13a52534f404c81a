//! LRU (Least Recently Used) cache implementation
//!
//! Entries live in a slab-backed recency list; the hash index maps keys to
//! slot handles, so lookup, promotion and eviction are all O(1).

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;

use tracing::{debug, trace};

use crate::capacity::Capacity;
use crate::entry::Entry;
use crate::error::Result;
use crate::index::Index;
use crate::list::{self, RecencyList};

/// Upper bound on the index preallocation done at construction
const MAX_PREALLOC: usize = 4096;

/// What a call to [`LruCache::insert`] did to the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion<K, V> {
    /// The key was new and there was room for it
    Inserted,
    /// The key was present; its previous value is returned
    Replaced(V),
    /// The key was new and the least recently used entry made room for it
    Evicted {
        /// Key of the evicted entry
        key: K,
        /// Value of the evicted entry
        value: V,
    },
}

/// LRU cache with fixed capacity
///
/// Both [`get`](LruCache::get) and [`put`](LruCache::put) mark the key as
/// most recently used. Once the cache is full, inserting a new key evicts the
/// least recently used entry.
pub struct LruCache<K, V> {
    index: Index<K>,
    list: RecencyList<K, V>,
    capacity: Capacity,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq,
{
    /// Create a new LRU cache holding at most `capacity` entries
    ///
    /// # Errors
    /// Returns [`Error::InvalidCapacity`](crate::Error::InvalidCapacity) if
    /// `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::with_capacity(Capacity::new(capacity)?))
    }

    /// Create a new LRU cache from an already validated capacity
    pub fn with_capacity(capacity: Capacity) -> Self {
        debug!(capacity = capacity.get(), "creating LRU cache");

        let prealloc = capacity.get().min(MAX_PREALLOC);
        Self {
            index: Index::with_capacity(prealloc),
            list: RecencyList::with_capacity(prealloc),
            capacity,
        }
    }

    /// Get a value from the cache, marking it most recently used
    ///
    /// Returns `None` on a miss; a miss leaves the cache untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.lookup(key)?;
        self.list.move_to_front(handle);
        self.list.get(handle).map(|entry| &entry.value)
    }

    /// Get a value without changing its recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.lookup(key)?;
        self.list.get(handle).map(|entry| &entry.value)
    }

    /// Check whether a key is cached, without changing its recency
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.lookup(key).is_some()
    }

    /// The entry that the next insertion of a new key would evict, if full
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.list.len() == 0
    }

    /// Get the maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Iterate over entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter(self.list.iter())
    }
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Insert or update a key-value pair, marking it most recently used
    ///
    /// Returns the previous value when the key was already cached.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.insert(key, value) {
            Insertion::Replaced(old) => Some(old),
            Insertion::Inserted | Insertion::Evicted { .. } => None,
        }
    }

    /// Insert or update a key-value pair, reporting any eviction
    pub fn insert(&mut self, key: K, value: V) -> Insertion<K, V> {
        if let Some(handle) = self.index.lookup(&key) {
            let old = match self.list.get_mut(handle) {
                Some(entry) => mem::replace(&mut entry.value, value),
                None => unreachable!("indexed handle does not hold an entry"),
            };
            self.list.move_to_front(handle);
            return Insertion::Replaced(old);
        }

        // The new key is absent, so the victim is the same whether we evict
        // before or after linking it; evicting first keeps the arena at
        // capacity + 2 slots.
        let evicted = if self.list.len() >= self.capacity.get() {
            self.evict()
        } else {
            None
        };

        let handle = self.list.insert_front(Entry::new(key.clone(), value));
        self.index.insert(key, handle);
        debug_assert_eq!(self.index.len(), self.list.len());

        match evicted {
            Some(entry) => Insertion::Evicted {
                key: entry.key,
                value: entry.value,
            },
            None => Insertion::Inserted,
        }
    }

    fn evict(&mut self) -> Option<Entry<K, V>> {
        let entry = self.list.remove_back()?;
        self.index.remove(&entry.key);
        trace!(len = self.list.len(), "evicted least recently used entry");
        Some(entry)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Hash + Eq + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over cache entries from most to least recently used
pub struct Iter<'a, K, V>(list::Iter<'a, K, V>);

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Hash + Eq,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + fmt::Debug,
{
    /// Assert the index and the recency list describe the same entries
    fn check_invariants(&self) {
        self.list.check_links();
        assert!(self.len() <= self.capacity());
        assert_eq!(self.index.len(), self.list.len());
        for entry in self.list.iter() {
            let handle = self.index.lookup(&entry.key);
            let indexed = handle.and_then(|handle| self.list.get(handle));
            assert!(
                indexed.is_some_and(|indexed| indexed.key == entry.key),
                "key {:?} not indexed to its own entry",
                entry.key
            );
        }
    }
}
