//! LFU (Least Frequently Used) eviction with an LRU tie-break.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LfuPolicy<K>                                    │
//!   │                                                                          │
//!   │   frequency: FrequencyTracker<K>      key → get count (absent = 0)       │
//!   │   recency:   RecencyTracker<K>        keys in get order, oldest first    │
//!   │   insertion: InsertionOrderTracker<K> resident keys in first-put order   │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Eviction Flow
//!
//! The check runs **after** the new key is stored and repeats while
//! `len > capacity`, so one put may evict several entries. The incoming key
//! is never a candidate.
//!
//! ```text
//!   any key ever read (frequency tracker non-empty)?
//!     │
//!     ├─ yes ─► min = lowest frequency among resident keys (absent = 0)
//!     │         candidates = resident keys with frequency == min
//!     │           │
//!     │           ├─ first candidate in access order (least recently read)
//!     │           └─ none read → first candidate in insertion order
//!     │
//!     └─ no  ─► least recently read key, if any
//!               (nothing was ever read → no eviction; the store stays
//!                over capacity)
//! ```
//!
//! A cache whose entries are only ever written has no frequency or access
//! data to rank them by. It grows past its nominal capacity until the first
//! successful `get`; the next insert then drains it back to capacity, or
//! until every read key has itself been evicted.
//!
//! The frequency map and the access order always hold the same keys: a
//! `get` adds a key to both, and removal drops it from both. So the "no"
//! branch only runs with an empty access order, and there is no state with
//! frequency data but no access order. `check_invariants` reports a length
//! mismatch between the two.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lfu::LfuCache;
//! use evictkit::sink::RecordingSink;
//!
//! let sink = RecordingSink::new();
//! let mut cache = LfuCache::with_sink(4, sink.clone());
//! for key in ["a", "b", "c", "d"] {
//!     cache.put(Some(key), Some(0));
//! }
//! for _ in 0..3 {
//!     cache.get(&"a");
//! }
//! cache.get(&"b");
//!
//! cache.put(Some("e"), Some(0));
//! assert_eq!(sink.keys(), vec!["c"]);
//! ```
use std::hash::Hash;

use crate::cache::Cache;
use crate::ds::{FrequencyTracker, InsertionOrderTracker, RecencyTracker};
use crate::error::{ConfigError, InvariantError};
use crate::policy::{ensure_resident, EvictionPolicy, EvictionTiming};
use crate::sink::{DiscardSink, StdoutSink};
use crate::store::bounded::{prealloc_hint, BoundedCache};

/// LFU cache: a [`Cache`] driven by [`LfuPolicy`].
pub type LfuCache<K, V, S = StdoutSink> = Cache<K, V, LfuPolicy<K>, S>;

/// Victim = least frequently read key, ties broken by least recent read.
#[derive(Debug)]
pub struct LfuPolicy<K> {
    frequency: FrequencyTracker<K>,
    recency: RecencyTracker<K>,
    insertion: InsertionOrderTracker<K>,
}

impl<K> LfuPolicy<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            frequency: FrequencyTracker::new(),
            recency: RecencyTracker::new(),
            insertion: InsertionOrderTracker::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        // the store briefly holds capacity + 1 keys
        let slots = prealloc_hint(capacity.saturating_add(1));
        Self {
            frequency: FrequencyTracker::with_capacity(slots),
            recency: RecencyTracker::with_capacity(slots),
            insertion: InsertionOrderTracker::with_capacity(slots),
        }
    }

    /// Number of successful reads of `key` since it was stored.
    pub fn frequency(&self, key: &K) -> u64 {
        self.frequency.frequency(key)
    }

    /// Read keys, least recently read first.
    pub fn access_order(&self) -> impl Iterator<Item = &K> {
        self.recency.iter()
    }
}

impl<K> Default for LfuPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for LfuPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn name(&self) -> &'static str {
        "lfu"
    }

    fn timing(&self) -> EvictionTiming {
        EvictionTiming::AfterInsert
    }

    fn record_insert(&mut self, key: &K) {
        self.insertion.record_insert(key);
    }

    fn record_access(&mut self, key: &K) {
        self.frequency.increment(key);
        self.recency.touch(key);
    }

    fn record_removal(&mut self, key: &K) {
        self.frequency.remove(key);
        self.recency.remove(key);
        self.insertion.remove(key);
    }

    fn select_victim(&self, incoming: &K) -> Option<K> {
        if self.frequency.is_empty() {
            return self
                .recency
                .least_recent()
                .filter(|key| *key != incoming)
                .cloned();
        }

        let resident = self.insertion.iter().filter(|key| *key != incoming);
        let min = self.frequency.min_frequency_among(resident)?;
        let is_candidate = |key: &K| key != incoming && self.frequency.frequency(key) == min;

        if let Some(key) = self.recency.first_matching(|key| is_candidate(key)) {
            return Some(key.clone());
        }
        self.insertion.iter().find(|key| is_candidate(*key)).cloned()
    }

    fn clear(&mut self) {
        self.frequency.clear();
        self.recency.clear();
        self.insertion.clear();
    }

    fn check_invariants<V>(&self, store: &BoundedCache<K, V>) -> Result<(), InvariantError> {
        self.frequency.check_invariants()?;
        self.recency.check_invariants()?;
        self.insertion.check_invariants()?;

        if self.insertion.len() != store.len() {
            return Err(InvariantError::new(format!(
                "lfu tracks {} keys but the store holds {}",
                self.insertion.len(),
                store.len()
            )));
        }
        if self.frequency.len() != self.recency.len() {
            return Err(InvariantError::new(format!(
                "lfu has {} frequency counters but {} access-order entries",
                self.frequency.len(),
                self.recency.len()
            )));
        }
        ensure_resident("lfu frequency map", self.frequency.iter().map(|(k, _)| k), store)?;
        ensure_resident("lfu access order", self.recency.iter(), store)?;
        ensure_resident("lfu insertion order", self.insertion.iter(), store)
    }
}

impl<K, V> Cache<K, V, LfuPolicy<K>, StdoutSink>
where
    K: Clone + Eq + Hash + std::fmt::Display,
{
    /// Creates an LFU cache that reports evictions on stdout.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::from_parts(capacity, LfuPolicy::with_capacity(capacity), StdoutSink)
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_from_parts(capacity, LfuPolicy::with_capacity(capacity), StdoutSink)
    }
}

impl<K, V, S> Cache<K, V, LfuPolicy<K>, S>
where
    K: Clone + Eq + Hash,
    S: DiscardSink<K>,
{
    pub fn with_sink(capacity: usize, sink: S) -> Self {
        Self::from_parts(capacity, LfuPolicy::with_capacity(capacity), sink)
    }

    pub fn try_with_sink(capacity: usize, sink: S) -> Result<Self, ConfigError> {
        Self::try_from_parts(capacity, LfuPolicy::with_capacity(capacity), sink)
    }
}
