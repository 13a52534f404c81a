//! Cache records and the slot handles that link them

/// Slot number of a node in the recency list arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle(usize);

impl Handle {
    pub(crate) const fn new(slot: usize) -> Self {
        Handle(slot)
    }

    pub(crate) const fn slot(self) -> usize {
        self.0
    }
}

/// Key/value record plus its position in the recency chain
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) prev: Handle,
    pub(crate) next: Handle,
}

impl<K, V> Entry<K, V> {
    /// Create a detached entry; links are set when it is spliced in
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: Handle::new(usize::MAX),
            next: Handle::new(usize::MAX),
        }
    }
}
