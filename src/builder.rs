//! Unified cache builder for all eviction policies.
//!
//! Picks the policy at runtime and hides it behind [`AnyPolicy`], so one
//! cache type covers FIFO, LFU, and MRU.
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//! use evictkit::sink::RecordingSink;
//!
//! let sink = RecordingSink::new();
//! let mut cache = CacheBuilder::new(2)
//!     .with_sink(sink.clone())
//!     .build::<u64, String>(CachePolicy::Mru);
//!
//! cache.insert(1, "one".to_string());
//! cache.insert(2, "two".to_string());
//! cache.insert(3, "three".to_string());
//!
//! assert_eq!(sink.keys(), vec![2]);
//! assert_eq!(cache.get(&1), Some(&"one".to_string()));
//! ```

use std::fmt;
use std::hash::Hash;

use crate::cache::Cache;
use crate::error::{ConfigError, InvariantError};
use crate::policy::{EvictionPolicy, EvictionTiming, FifoPolicy, LfuPolicy, MruPolicy};
use crate::sink::{DiscardSink, StdoutSink};
use crate::store::bounded::BoundedCache;

/// Capacity used by [`CacheBuilder::default`].
pub const DEFAULT_MAX_ITEMS: usize = 4;

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// First In, First Out eviction.
    Fifo,
    /// Least Frequently Used eviction with an LRU tie-break.
    Lfu,
    /// Most Recently Used eviction.
    Mru,
}

impl CachePolicy {
    pub const ALL: [CachePolicy; 3] = [CachePolicy::Fifo, CachePolicy::Lfu, CachePolicy::Mru];

    pub fn name(self) -> &'static str {
        match self {
            CachePolicy::Fifo => "fifo",
            CachePolicy::Lfu => "lfu",
            CachePolicy::Mru => "mru",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime-selected policy; dispatches every hook by `match`.
#[derive(Debug)]
pub enum AnyPolicy<K> {
    Fifo(FifoPolicy<K>),
    Lfu(LfuPolicy<K>),
    Mru(MruPolicy<K>),
}

impl<K> AnyPolicy<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new(policy: CachePolicy, capacity: usize) -> Self {
        match policy {
            CachePolicy::Fifo => AnyPolicy::Fifo(FifoPolicy::with_capacity(capacity)),
            CachePolicy::Lfu => AnyPolicy::Lfu(LfuPolicy::with_capacity(capacity)),
            CachePolicy::Mru => AnyPolicy::Mru(MruPolicy::with_capacity(capacity)),
        }
    }

    pub fn kind(&self) -> CachePolicy {
        match self {
            AnyPolicy::Fifo(_) => CachePolicy::Fifo,
            AnyPolicy::Lfu(_) => CachePolicy::Lfu,
            AnyPolicy::Mru(_) => CachePolicy::Mru,
        }
    }
}

impl<K> EvictionPolicy<K> for AnyPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn timing(&self) -> EvictionTiming {
        match self {
            AnyPolicy::Fifo(p) => p.timing(),
            AnyPolicy::Lfu(p) => p.timing(),
            AnyPolicy::Mru(p) => p.timing(),
        }
    }

    fn record_insert(&mut self, key: &K) {
        match self {
            AnyPolicy::Fifo(p) => p.record_insert(key),
            AnyPolicy::Lfu(p) => p.record_insert(key),
            AnyPolicy::Mru(p) => p.record_insert(key),
        }
    }

    fn record_update(&mut self, key: &K) {
        match self {
            AnyPolicy::Fifo(p) => p.record_update(key),
            AnyPolicy::Lfu(p) => p.record_update(key),
            AnyPolicy::Mru(p) => p.record_update(key),
        }
    }

    fn record_access(&mut self, key: &K) {
        match self {
            AnyPolicy::Fifo(p) => p.record_access(key),
            AnyPolicy::Lfu(p) => p.record_access(key),
            AnyPolicy::Mru(p) => p.record_access(key),
        }
    }

    fn record_removal(&mut self, key: &K) {
        match self {
            AnyPolicy::Fifo(p) => p.record_removal(key),
            AnyPolicy::Lfu(p) => p.record_removal(key),
            AnyPolicy::Mru(p) => p.record_removal(key),
        }
    }

    fn select_victim(&self, incoming: &K) -> Option<K> {
        match self {
            AnyPolicy::Fifo(p) => p.select_victim(incoming),
            AnyPolicy::Lfu(p) => p.select_victim(incoming),
            AnyPolicy::Mru(p) => p.select_victim(incoming),
        }
    }

    fn clear(&mut self) {
        match self {
            AnyPolicy::Fifo(p) => p.clear(),
            AnyPolicy::Lfu(p) => p.clear(),
            AnyPolicy::Mru(p) => p.clear(),
        }
    }

    fn check_invariants<V>(&self, store: &BoundedCache<K, V>) -> Result<(), InvariantError> {
        match self {
            AnyPolicy::Fifo(p) => p.check_invariants(store),
            AnyPolicy::Lfu(p) => p.check_invariants(store),
            AnyPolicy::Mru(p) => p.check_invariants(store),
        }
    }
}

/// Cache produced by [`CacheBuilder`].
pub type PolicyCache<K, V, S = StdoutSink> = Cache<K, V, AnyPolicy<K>, S>;

/// Builder for creating cache instances.
#[derive(Debug, Clone)]
pub struct CacheBuilder<S = StdoutSink> {
    capacity: usize,
    sink: S,
}

impl CacheBuilder<StdoutSink> {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            sink: StdoutSink,
        }
    }
}

impl Default for CacheBuilder<StdoutSink> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITEMS)
    }
}

impl<S> CacheBuilder<S> {
    /// Replaces the discard sink.
    pub fn with_sink<S2>(self, sink: S2) -> CacheBuilder<S2> {
        CacheBuilder {
            capacity: self.capacity,
            sink,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Build a cache with the specified policy.
    ///
    /// Returns [`ConfigError`] if the capacity is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// assert!(CacheBuilder::new(0).try_build::<u64, u64>(CachePolicy::Fifo).is_err());
    ///
    /// let cache = CacheBuilder::default().try_build::<u64, u64>(CachePolicy::Lfu).unwrap();
    /// assert_eq!(cache.capacity(), 4);
    /// assert_eq!(cache.policy_name(), "lfu");
    /// ```
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<PolicyCache<K, V, S>, ConfigError>
    where
        K: Clone + Eq + Hash,
        S: DiscardSink<K>,
    {
        Cache::try_from_parts(
            self.capacity,
            AnyPolicy::new(policy, self.capacity),
            self.sink,
        )
    }

    /// Panicking form of [`try_build`](Self::try_build).
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero.
    pub fn build<K, V>(self, policy: CachePolicy) -> PolicyCache<K, V, S>
    where
        K: Clone + Eq + Hash,
        S: DiscardSink<K>,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }
}
