//! # lrucache
//!
//! Bounded least-recently-used cache with O(1) lookup, insertion and eviction.
//!
//! ## Architecture
//! - **Recency list**: doubly-linked chain stored in a slab arena, bounded by
//!   two sentinel slots; links are slot handles, not pointers
//! - **Index**: AHash map from key to slot handle
//! - **LruCache**: owns both and keeps them in step on every `get`/`put`
//! - **SharedLruCache**: one exclusive lock plus hit/miss statistics for
//!   multi-threaded callers
//!
//! ```
//! use lrucache::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(&1);
//! cache.put(3, "three"); // evicts 2
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some(&"one"));
//! # Ok::<(), lrucache::Error>(())
//! ```

#![warn(missing_docs)]

mod capacity;
mod entry;
mod error;
mod index;
mod list;
mod lru;
mod shared;
mod stats;

pub use capacity::Capacity;
pub use error::{Error, Result};
pub use lru::{Insertion, Iter, LruCache};
pub use shared::SharedLruCache;
pub use stats::CacheStats;
