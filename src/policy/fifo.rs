//! FIFO (First In, First Out) eviction.
//!
//! Evicts the key that was first inserted longest ago and is still resident.
//! The check runs before a new key is stored: with the store full, the head
//! of the insertion order leaves first. Putting a resident key again replaces
//! its value in place; it neither evicts nor changes the key's rank. Reads do
//! not affect the order.
//!
//! ```text
//!   capacity 4
//!
//!   put a, b, c, d      order: [a] ─ [b] ─ [c] ─ [d]
//!   put b (update)      order: [a] ─ [b] ─ [c] ─ [d]     (unchanged)
//!   put e               DISCARD: a
//!                       order: [b] ─ [c] ─ [d] ─ [e]
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::fifo::FifoCache;
//! use evictkit::sink::RecordingSink;
//!
//! let sink = RecordingSink::new();
//! let mut cache = FifoCache::with_sink(2, sink.clone());
//! cache.put(Some("a"), Some(1));
//! cache.put(Some("b"), Some(2));
//! cache.put(Some("c"), Some(3));
//!
//! assert_eq!(sink.keys(), vec!["a"]);
//! assert!(!cache.contains(&"a"));
//! ```
use std::hash::Hash;

use crate::cache::Cache;
use crate::ds::InsertionOrderTracker;
use crate::error::{ConfigError, InvariantError};
use crate::policy::{ensure_resident, EvictionPolicy, EvictionTiming};
use crate::sink::{DiscardSink, StdoutSink};
use crate::store::bounded::{prealloc_hint, BoundedCache};

/// FIFO cache: a [`Cache`] driven by [`FifoPolicy`].
pub type FifoCache<K, V, S = StdoutSink> = Cache<K, V, FifoPolicy<K>, S>;

/// Victim = oldest first-inserted key.
#[derive(Debug)]
pub struct FifoPolicy<K> {
    insertion: InsertionOrderTracker<K>,
}

impl<K> FifoPolicy<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            insertion: InsertionOrderTracker::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            insertion: InsertionOrderTracker::with_capacity(prealloc_hint(capacity)),
        }
    }

    /// The key that will be evicted next.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.insertion.oldest()
    }

    /// Zero-based insertion rank of `key` (0 = next victim).
    pub fn age_rank(&self, key: &K) -> Option<usize> {
        self.insertion.rank(key)
    }
}

impl<K> Default for FifoPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for FifoPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn timing(&self) -> EvictionTiming {
        EvictionTiming::BeforeInsert
    }

    fn record_insert(&mut self, key: &K) {
        self.insertion.record_insert(key);
    }

    fn record_access(&mut self, _key: &K) {}

    fn record_removal(&mut self, key: &K) {
        self.insertion.remove(key);
    }

    fn select_victim(&self, incoming: &K) -> Option<K> {
        self.insertion.iter().find(|key| *key != incoming).cloned()
    }

    fn clear(&mut self) {
        self.insertion.clear();
    }

    fn check_invariants<V>(&self, store: &BoundedCache<K, V>) -> Result<(), InvariantError> {
        self.insertion.check_invariants()?;
        if self.insertion.len() != store.len() {
            return Err(InvariantError::new(format!(
                "fifo tracks {} keys but the store holds {}",
                self.insertion.len(),
                store.len()
            )));
        }
        ensure_resident("fifo insertion order", self.insertion.iter(), store)
    }
}

impl<K, V> Cache<K, V, FifoPolicy<K>, StdoutSink>
where
    K: Clone + Eq + Hash + std::fmt::Display,
{
    /// Creates a FIFO cache that reports evictions on stdout.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::from_parts(capacity, FifoPolicy::with_capacity(capacity), StdoutSink)
    }

    /// Creates a FIFO cache, returning [`ConfigError`] for a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_from_parts(capacity, FifoPolicy::with_capacity(capacity), StdoutSink)
    }
}

impl<K, V, S> Cache<K, V, FifoPolicy<K>, S>
where
    K: Clone + Eq + Hash,
    S: DiscardSink<K>,
{
    /// Creates a FIFO cache reporting evictions to `sink`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_sink(capacity: usize, sink: S) -> Self {
        Self::from_parts(capacity, FifoPolicy::with_capacity(capacity), sink)
    }

    pub fn try_with_sink(capacity: usize, sink: S) -> Result<Self, ConfigError> {
        Self::try_from_parts(capacity, FifoPolicy::with_capacity(capacity), sink)
    }
}
