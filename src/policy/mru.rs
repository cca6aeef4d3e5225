//! MRU (Most Recently Used) eviction.
//!
//! Evicts the **newest** resident entry, the opposite of LRU. Recency here
//! is decided purely by insertion position: the victim is the tail of the
//! insertion order, i.e. the key most recently put for the first time. The
//! incoming key is never the victim; it replaces the entry that was last in.
//!
//! ```text
//!   capacity 4
//!
//!   put a, b, c, d      order: [a] ─ [b] ─ [c] ─ [d]
//!   get a               order: [a] ─ [b] ─ [c] ─ [d]     (reads do not move keys)
//!   put e               DISCARD: d
//!                       order: [a] ─ [b] ─ [c] ─ [e]
//! ```
//!
//! Putting a resident key again replaces its value in place; it does not
//! evict and does not move the key.
//!
//! ## When to Use
//!
//! Cyclic scans where the entry just loaded is the one least likely to be
//! needed again before the cycle wraps around.
use std::hash::Hash;

use crate::cache::Cache;
use crate::ds::InsertionOrderTracker;
use crate::error::{ConfigError, InvariantError};
use crate::policy::{ensure_resident, EvictionPolicy, EvictionTiming};
use crate::sink::{DiscardSink, StdoutSink};
use crate::store::bounded::{prealloc_hint, BoundedCache};

/// MRU cache: a [`Cache`] driven by [`MruPolicy`].
pub type MruCache<K, V, S = StdoutSink> = Cache<K, V, MruPolicy<K>, S>;

/// Victim = newest first-inserted key.
#[derive(Debug)]
pub struct MruPolicy<K> {
    insertion: InsertionOrderTracker<K>,
}

impl<K> MruPolicy<K>
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
    pub fn peek_newest(&self) -> Option<&K> {
        self.insertion.newest()
    }
}

impl<K> Default for MruPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for MruPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn name(&self) -> &'static str {
        "mru"
    }

    fn timing(&self) -> EvictionTiming {
        EvictionTiming::BeforeInsert
    }

    fn record_insert(&mut self, key: &K) {
        self.insertion.record_insert(key);
    }

    // rank is insertion position only
    fn record_access(&mut self, _key: &K) {}

    fn record_removal(&mut self, key: &K) {
        self.insertion.remove(key);
    }

    fn select_victim(&self, incoming: &K) -> Option<K> {
        match self.insertion.newest() {
            Some(newest) if newest != incoming => Some(newest.clone()),
            _ => None,
        }
    }

    fn clear(&mut self) {
        self.insertion.clear();
    }

    fn check_invariants<V>(&self, store: &BoundedCache<K, V>) -> Result<(), InvariantError> {
        self.insertion.check_invariants()?;
        if self.insertion.len() != store.len() {
            return Err(InvariantError::new(format!(
                "mru tracks {} keys but the store holds {}",
                self.insertion.len(),
                store.len()
            )));
        }
        ensure_resident("mru insertion order", self.insertion.iter(), store)
    }
}

impl<K, V> Cache<K, V, MruPolicy<K>, StdoutSink>
where
    K: Clone + Eq + Hash + std::fmt::Display,
{
    /// Creates an MRU cache that reports evictions on stdout.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::from_parts(capacity, MruPolicy::with_capacity(capacity), StdoutSink)
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_from_parts(capacity, MruPolicy::with_capacity(capacity), StdoutSink)
    }
}

impl<K, V, S> Cache<K, V, MruPolicy<K>, S>
where
    K: Clone + Eq + Hash,
    S: DiscardSink<K>,
{
    pub fn with_sink(capacity: usize, sink: S) -> Self {
        Self::from_parts(capacity, MruPolicy::with_capacity(capacity), sink)
    }

    pub fn try_with_sink(capacity: usize, sink: S) -> Result<Self, ConfigError> {
        Self::try_from_parts(capacity, MruPolicy::with_capacity(capacity), sink)
    }
}
