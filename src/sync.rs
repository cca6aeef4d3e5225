//! Thread-safe wrapper around [`Cache`].
//!
//! ```text
//!   ConcurrentCache<K, V, P, S>
//!     inner: Arc<Mutex<Cache<K, V, P, S>>>
//!
//!   clone() ─► shares `inner`
//!   every operation ─► lock, delegate, unlock
//! ```
//!
//! Store, trackers, and sink are mutated under one `parking_lot::Mutex`, so a
//! put and the eviction it triggers are observed as a single step. `get`
//! updates policy state, which rules out a shared read lock.
//!
//! ## Example
//!
//! ```
//! use evictkit::policy::fifo::FifoCache;
//! use evictkit::sink::NoopSink;
//! use evictkit::sync::ConcurrentCache;
//!
//! let cache = ConcurrentCache::new(FifoCache::with_sink(2, NoopSink));
//! let handle = cache.clone();
//! std::thread::spawn(move || {
//!     handle.put(Some(1), Some("one".to_string()));
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(cache.get_cloned(&1), Some("one".to_string()));
//! ```
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::Cache;
use crate::policy::EvictionPolicy;
use crate::sink::DiscardSink;

/// Shared handle to one [`Cache`]. Clones refer to the same cache.
pub struct ConcurrentCache<K, V, P, S> {
    inner: Arc<Mutex<Cache<K, V, P, S>>>,
}

impl<K, V, P, S> Clone for ConcurrentCache<K, V, P, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, P, S> ConcurrentCache<K, V, P, S>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy<K>,
    S: DiscardSink<K>,
{
    pub fn new(cache: Cache<K, V, P, S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Null-guarded put; see [`Cache::put`].
    pub fn put(&self, key: Option<K>, value: Option<V>) {
        self.inner.lock().put(key, value);
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    /// Gets a cloned value by key, recording the access.
    ///
    /// For non-cloneable values, use [`with`](Self::with).
    pub fn get_cloned(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Runs `f` with exclusive access to the cache.
    ///
    /// Several operations inside one call are atomic with respect to other
    /// handles.
    pub fn with<R>(&self, f: impl FnOnce(&mut Cache<K, V, P, S>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl<K, V, P, S> From<Cache<K, V, P, S>> for ConcurrentCache<K, V, P, S>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy<K>,
    S: DiscardSink<K>,
{
    fn from(cache: Cache<K, V, P, S>) -> Self {
        Self::new(cache)
    }
}

impl<K, V, P, S> fmt::Debug for ConcurrentCache<K, V, P, S>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f.debug_tuple("ConcurrentCache").field(&*cache).finish(),
            None => f.write_str("ConcurrentCache(<locked>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::lfu::LfuCache;
    use crate::sink::RecordingSink;

    #[test]
    fn clones_share_state() {
        let sink = RecordingSink::new();
        let cache = ConcurrentCache::new(LfuCache::with_sink(2, sink.clone()));
        let other = cache.clone();

        other.insert("a", 1);
        other.insert("b", 2);
        assert_eq!(cache.get_cloned(&"a"), Some(1));
        cache.insert("c", 3);

        assert_eq!(sink.keys(), vec!["b"]);
        assert_eq!(other.len(), 2);
        assert_eq!(other.capacity(), 2);
    }

    #[test]
    fn with_groups_operations() {
        let cache = ConcurrentCache::from(LfuCache::with_sink(4, RecordingSink::new()));
        let freq = cache.with(|inner| {
            inner.insert("k", 0);
            inner.get(&"k");
            inner.get(&"k");
            inner.policy().frequency(&"k")
        });
        assert_eq!(freq, 2);
    }

    #[test]
    fn null_guard_and_clear() {
        let cache = ConcurrentCache::new(LfuCache::with_sink(4, RecordingSink::new()));
        cache.put(None, Some(1));
        cache.put(Some("a"), None);
        assert!(cache.is_empty());

        cache.put(Some("a"), Some(1));
        assert!(cache.contains(&"a"));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn debug_reports_lock_state() {
        let cache = ConcurrentCache::new(LfuCache::with_sink(4, RecordingSink::<u8>::new()));
        cache.insert(1u8, ());
        assert!(format!("{:?}", cache).contains("lfu"));
        cache.with(|_| assert_eq!(format!("{:?}", cache), "ConcurrentCache(<locked>)"));
    }
}
