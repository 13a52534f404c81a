//! Recency list: a doubly-linked chain of entries stored in a slab arena.
//!
//! Slots 0 and 1 hold the front and back sentinels. Every real entry sits
//! strictly between them, so splicing never has to special-case an empty
//! neighbour. Freed slots are recycled through `free` before the arena grows.

use std::mem;

use crate::entry::{Entry, Handle};

/// Front sentinel; its `next` is the most recently used entry
const FRONT: Handle = Handle::new(0);

/// Back sentinel; its `prev` is the least recently used entry
const BACK: Handle = Handle::new(1);

/// Upper bound on the arena preallocation done at construction
const MAX_PREALLOC: usize = 4096;

enum Slot<K, V> {
    Sentinel { prev: Handle, next: Handle },
    Occupied(Entry<K, V>),
    Vacant,
}

pub(crate) struct RecencyList<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<Handle>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    /// Create an empty list sized for `capacity` entries
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.min(MAX_PREALLOC) + 2);
        slots.push(Slot::Sentinel {
            prev: FRONT,
            next: BACK,
        });
        slots.push(Slot::Sentinel {
            prev: FRONT,
            next: BACK,
        });

        Self {
            slots,
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of real entries between the sentinels
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Splice a new entry right after the front sentinel
    pub(crate) fn insert_front(&mut self, entry: Entry<K, V>) -> Handle {
        let handle = match self.free.pop() {
            Some(handle) => {
                self.slots[handle.slot()] = Slot::Occupied(entry);
                handle
            }
            None => {
                self.slots.push(Slot::Occupied(entry));
                Handle::new(self.slots.len() - 1)
            }
        };

        self.link_after(handle, FRONT);
        self.len += 1;
        handle
    }

    /// Detach an entry from its position and re-splice it at the front
    pub(crate) fn move_to_front(&mut self, handle: Handle) {
        if self.next(FRONT) == handle {
            return; // Already at front
        }

        self.unlink(handle);
        self.link_after(handle, FRONT);
    }

    /// Detach and return the least recently used entry
    pub(crate) fn remove_back(&mut self) -> Option<Entry<K, V>> {
        let handle = self.prev(BACK);
        if handle == FRONT {
            return None;
        }

        self.unlink(handle);
        let slot = mem::replace(&mut self.slots[handle.slot()], Slot::Vacant);
        self.free.push(handle);
        self.len -= 1;

        match slot {
            Slot::Occupied(entry) => Some(entry),
            _ => unreachable!("sentinel or vacant slot linked before back sentinel"),
        }
    }

    pub(crate) fn get(&self, handle: Handle) -> Option<&Entry<K, V>> {
        match self.slots.get(handle.slot()) {
            Some(Slot::Occupied(entry)) => Some(entry),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<K, V>> {
        match self.slots.get_mut(handle.slot()) {
            Some(Slot::Occupied(entry)) => Some(entry),
            _ => None,
        }
    }

    /// Least recently used entry, left in place
    pub(crate) fn back(&self) -> Option<&Entry<K, V>> {
        self.get(self.prev(BACK))
    }

    /// Iterate from most to least recently used
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.next(FRONT),
            remaining: self.len,
        }
    }

    fn link_after(&mut self, handle: Handle, at: Handle) {
        let next = self.next(at);
        self.set_links(handle, at, next);
        self.set_next(at, handle);
        self.set_prev(next, handle);
    }

    fn unlink(&mut self, handle: Handle) {
        let prev = self.prev(handle);
        let next = self.next(handle);
        self.set_next(prev, next);
        self.set_prev(next, prev);
    }

    fn prev(&self, handle: Handle) -> Handle {
        match &self.slots[handle.slot()] {
            Slot::Sentinel { prev, .. } => *prev,
            Slot::Occupied(entry) => entry.prev,
            Slot::Vacant => unreachable!("vacant slot {} is not linked", handle.slot()),
        }
    }

    fn next(&self, handle: Handle) -> Handle {
        match &self.slots[handle.slot()] {
            Slot::Sentinel { next, .. } => *next,
            Slot::Occupied(entry) => entry.next,
            Slot::Vacant => unreachable!("vacant slot {} is not linked", handle.slot()),
        }
    }

    fn set_prev(&mut self, handle: Handle, to: Handle) {
        match &mut self.slots[handle.slot()] {
            Slot::Sentinel { prev, .. } => *prev = to,
            Slot::Occupied(entry) => entry.prev = to,
            Slot::Vacant => unreachable!("vacant slot {} is not linked", handle.slot()),
        }
    }

    fn set_next(&mut self, handle: Handle, to: Handle) {
        match &mut self.slots[handle.slot()] {
            Slot::Sentinel { next, .. } => *next = to,
            Slot::Occupied(entry) => entry.next = to,
            Slot::Vacant => unreachable!("vacant slot {} is not linked", handle.slot()),
        }
    }

    fn set_links(&mut self, handle: Handle, prev: Handle, next: Handle) {
        self.set_prev(handle, prev);
        self.set_next(handle, next);
    }

    /// Total arena slots, sentinels and vacant slots included
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Walk the chain both ways and assert every link is mirrored
    #[cfg(test)]
    pub(crate) fn check_links(&self) {
        assert_ne!(FRONT, BACK);
        assert!(matches!(self.slots[FRONT.slot()], Slot::Sentinel { .. }));
        assert!(matches!(self.slots[BACK.slot()], Slot::Sentinel { .. }));

        let mut count = 0;
        let mut cursor = self.next(FRONT);
        let mut prev = FRONT;
        while cursor != BACK {
            assert!(self.get(cursor).is_some(), "non-entry slot inside chain");
            assert_eq!(self.prev(cursor), prev);
            assert_eq!(self.next(prev), cursor);
            prev = cursor;
            cursor = self.next(cursor);
            count += 1;
            assert!(count <= self.len, "chain longer than len (cycle?)");
        }
        assert_eq!(self.prev(BACK), prev);
        assert_eq!(count, self.len);

        let occupied = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count();
        assert_eq!(occupied, self.len);
        assert_eq!(self.slots.len(), self.len + self.free.len() + 2);
    }
}

/// Iterator over entries from most to least recently used
pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Handle,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let entry = self.list.get(self.cursor)?;
        self.cursor = entry.next;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
