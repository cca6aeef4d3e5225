//! Fixed-capacity key/value store shared by every eviction policy.
//!
//! `BoundedCache` owns the authoritative key → value mapping and knows its
//! capacity, but never evicts on its own: deciding what to drop is the job of
//! the [`EvictionPolicy`](crate::policy::EvictionPolicy) wired next to it by
//! [`Cache`](crate::cache::Cache). Capacity is counted in entries, not bytes.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::store::bounded::BoundedCache;
//!
//! let mut store = BoundedCache::new(2);
//! store.put("a", 1);
//! store.put("b", 2);
//! assert!(store.is_full());
//!
//! // The store itself happily goes over capacity.
//! store.put("c", 3);
//! assert!(store.is_over_capacity());
//! assert_eq!(store.remove(&"a"), Some(1));
//! assert_eq!(store.size(), 2);
//! ```
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::ConfigError;

/// Upper bound on up-front allocation; larger caches grow on demand.
pub(crate) const MAX_PREALLOC: usize = 1 << 16;

/// Allocation hint for a structure expected to hold `capacity` entries.
pub(crate) fn prealloc_hint(capacity: usize) -> usize {
    capacity.min(MAX_PREALLOC)
}

/// Entry-count bounded key/value store.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    map: FxHashMap<K, V>,
    capacity: usize,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash,
{
    /// Creates a store holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(store) => store,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a store, returning an error for a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(
                prealloc_hint(capacity.saturating_add(1)),
                Default::default(),
            ),
            capacity,
        })
    }

    /// Inserts or overwrites `key`, returning the previous value.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.map.get_mut(key)
    }

    /// Deletes `key` if present; a missing key is a no-op.
    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.map.remove(key)
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Current entry count.
    #[inline]
    pub fn size(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The fixed `MAX_ITEMS` bound.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `true` once adding another key would exceed capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.map.len() >= self.capacity
    }

    #[inline]
    pub fn is_over_capacity(&self) -> bool {
        self.map.len() > self.capacity
    }

    /// Keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}
