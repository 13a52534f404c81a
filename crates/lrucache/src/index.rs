//! Key to slot handle lookup

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::entry::Handle;

/// Hash index from key to the handle of its entry in the recency list.
///
/// Holds handles only; the recency list owns the entries.
pub(crate) struct Index<K> {
    map: HashMap<K, Handle, RandomState>,
}

impl<K: Hash + Eq> Index<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub(crate) fn lookup<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    /// Map a key that is not yet present
    pub(crate) fn insert(&mut self, key: K, handle: Handle) {
        let previous = self.map.insert(key, handle);
        debug_assert!(previous.is_none(), "key already indexed");
    }

    /// Drop the mapping for a key that is present
    pub(crate) fn remove(&mut self, key: &K) {
        let removed = self.map.remove(key);
        debug_assert!(removed.is_some(), "key not indexed");
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}
