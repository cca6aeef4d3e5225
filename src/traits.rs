//! # Cache Trait Hierarchy
//!
//! Policy-independent interface over every cache in the crate, so callers can
//! be written once and driven by FIFO, LFU, or MRU eviction.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │          ReadOnlyCache<K, V>            │
//!   │                                         │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  clear(&mut)                            │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! `ReadOnlyCache` never touches policy state: `contains` is not an access
//! and does not count toward LFU frequency. `CoreCache::get` is an access.
//!
//! There is deliberately no `remove`: entries leave only through eviction
//! (which notifies the discard sink) or `clear`.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::traits::CoreCache;
//! use evictkit::policy::fifo::FifoCache;
//! use evictkit::sink::NoopSink;
//!
//! fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
//!     for (key, value) in data {
//!         cache.insert(*key, value.clone());
//!     }
//! }
//!
//! let mut cache = FifoCache::with_sink(2, NoopSink);
//! warm_cache(&mut cache, &[(1, "one".into()), (2, "two".into()), (3, "three".into())]);
//! assert_eq!(cache.len(), 2);
//! assert!(!cache.contains(&1));
//! ```

/// Inspection operations that never affect eviction order.
pub trait ReadOnlyCache<K, V> {
    /// Returns `true` if `key` is resident.
    ///
    /// Does not count as an access.
    fn contains(&self, key: &K) -> bool;

    /// Number of resident entries.
    ///
    /// May exceed [`capacity`](Self::capacity) for an LFU cache with no read
    /// history; the next insert after a read brings it back.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries the eviction policy aims to keep.
    fn capacity(&self) -> usize;
}

/// Core cache operations that all caches support.
///
/// # Example
///
/// ```
/// use evictkit::traits::CoreCache;
/// use evictkit::policy::lfu::LfuCache;
/// use evictkit::sink::NoopSink;
///
/// let mut cache = LfuCache::with_sink(10, NoopSink);
///
/// // New key returns None
/// assert_eq!(cache.insert(1, "first"), None);
///
/// // Existing key returns previous value
/// assert_eq!(cache.insert(1, "second"), Some("first"));
/// assert_eq!(CoreCache::get(&mut cache, &1), Some(&"second"));
/// ```
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// Inserting a new key may evict one resident entry according to the
    /// cache's policy. Replacing an existing key's value never evicts.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key, recording the access with the
    /// policy on a hit.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Removes all entries without emitting discard notifications.
    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::fifo::FifoCache;
    use crate::policy::lfu::LfuCache;
    use crate::policy::mru::MruCache;
    use crate::sink::RecordingSink;

    fn fill<C: CoreCache<u32, u32>>(cache: &mut C, n: u32) {
        for i in 0..n {
            cache.insert(i, i * 10);
        }
    }

    fn occupancy<C: ReadOnlyCache<u32, u32>>(cache: &C) -> (usize, usize) {
        (cache.len(), cache.capacity())
    }

    #[test]
    fn generic_helpers_drive_every_policy() {
        let fifo_sink = RecordingSink::new();
        let mut fifo = FifoCache::with_sink(3, fifo_sink.clone());
        fill(&mut fifo, 5);
        assert_eq!(occupancy(&fifo), (3, 3));
        assert_eq!(fifo_sink.keys(), vec![0, 1]);

        let mru_sink = RecordingSink::new();
        let mut mru = MruCache::with_sink(3, mru_sink.clone());
        fill(&mut mru, 5);
        assert_eq!(occupancy(&mru), (3, 3));
        assert_eq!(mru_sink.keys(), vec![2, 3]);
    }

    #[test]
    fn contains_is_not_an_access() {
        let mut cache = LfuCache::with_sink(2, RecordingSink::new());
        fill(&mut cache, 2);
        assert!(ReadOnlyCache::contains(&cache, &0));
        assert_eq!(cache.policy().frequency(&0), 0);

        assert_eq!(CoreCache::get(&mut cache, &0), Some(&0));
        assert_eq!(cache.policy().frequency(&0), 1);
    }

    #[test]
    fn clear_empties_through_trait() {
        let sink = RecordingSink::new();
        let mut cache = FifoCache::with_sink(4, sink.clone());
        fill(&mut cache, 4);
        CoreCache::clear(&mut cache);

        assert!(ReadOnlyCache::is_empty(&cache));
        assert!(sink.is_empty());
    }
}
