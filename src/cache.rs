//! Composition root: a [`BoundedCache`] wired to one [`EvictionPolicy`] and a
//! [`DiscardSink`].
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                        Cache<K, V, P, S>                             │
//!   │                                                                      │
//!   │   store:  BoundedCache<K, V>     authoritative key → value map       │
//!   │   policy: P: EvictionPolicy<K>   trackers + victim selection         │
//!   │   sink:   S: DiscardSink<K>      one notification per eviction       │
//!   └──────────────────────────────────────────────────────────────────────┘
//!
//!   put(Some(k), Some(v))
//!     │
//!     ├─ k resident? ── yes ─► replace value, policy.record_update(k)
//!     │
//!     ├─ BeforeInsert && len >= capacity ─► evict one
//!     ├─ store.put(k, v), policy.record_insert(k)
//!     └─ AfterInsert && len > capacity  ─► evict one, repeat while over
//!
//!   evict one:
//!     victim = policy.select_victim(k)?       (None → stay over capacity)
//!     store.remove(victim), policy.record_removal(victim)
//!     sink.discard(victim)                    "DISCARD: <victim>"
//! ```
//!
//! The store and the trackers are always mutated together inside one call,
//! so tracked keys never outlive their store entry.
//!
//! ## Thread Safety
//!
//! `Cache` is single-threaded. Use
//! [`ConcurrentCache`](crate::sync::ConcurrentCache) to share one between
//! threads.
use std::hash::Hash;

use tracing::{debug, trace};

use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, CacheMetricsSnapshot};
use crate::policy::{EvictionPolicy, EvictionTiming};
use crate::sink::{DiscardSink, StdoutSink};
use crate::store::bounded::BoundedCache;
use crate::traits::{CoreCache, ReadOnlyCache};

/// Fixed-capacity cache driven by an eviction policy.
///
/// Usually named through one of the aliases
/// [`FifoCache`](crate::policy::fifo::FifoCache),
/// [`LfuCache`](crate::policy::lfu::LfuCache),
/// [`MruCache`](crate::policy::mru::MruCache), or built with
/// [`CacheBuilder`](crate::builder::CacheBuilder).
pub struct Cache<K, V, P, S = StdoutSink> {
    store: BoundedCache<K, V>,
    policy: P,
    sink: S,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V, P, S> Cache<K, V, P, S>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy<K>,
    S: DiscardSink<K>,
{
    /// Assembles a cache from its parts.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_from_parts`](Self::try_from_parts).
    pub fn from_parts(capacity: usize, policy: P, sink: S) -> Self {
        match Self::try_from_parts(capacity, policy, sink) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Assembles a cache, returning [`ConfigError`] for a zero capacity.
    pub fn try_from_parts(capacity: usize, policy: P, sink: S) -> Result<Self, ConfigError> {
        Ok(Self {
            store: BoundedCache::try_new(capacity)?,
            policy,
            sink,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        })
    }

    /// Stores `value` under `key`, evicting per policy.
    ///
    /// If either argument is `None` the call does nothing: no insertion, no
    /// eviction, no notification.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let mut cache: FifoCache<&str, i32> = FifoCache::new(4);
    /// cache.put(Some("a"), Some(1));
    /// cache.put(None, Some(2));
    /// cache.put(Some("b"), None);
    ///
    /// assert_eq!(cache.len(), 1);
    /// assert_eq!(cache.get(&"a"), Some(&1));
    /// ```
    pub fn put(&mut self, key: Option<K>, value: Option<V>) {
        #[cfg(feature = "metrics")]
        self.metrics.record_put_call();

        let (Some(key), Some(value)) = (key, value) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_ignored();
            trace!(policy = self.policy.name(), "put ignored: missing key or value");
            return;
        };
        self.insert(key, value);
    }

    /// Typed form of [`put`](Self::put); returns the replaced value, if any.
    ///
    /// Replacing the value of a resident key never evicts and never changes
    /// the key's insertion rank. Policies checked before insert evict at most
    /// one entry per call; policies checked after insert evict until the
    /// store is back within capacity or no victim is left.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.store.get_mut(&key) {
            let old = std::mem::replace(slot, value);
            self.policy.record_update(&key);
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return Some(old);
        }

        let timing = self.policy.timing();
        if timing == EvictionTiming::BeforeInsert && self.store.is_full() {
            self.evict_one(&key);
        }

        self.store.put(key.clone(), value);
        self.policy.record_insert(&key);
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        // drain back to capacity; stops early when the policy has no victim
        while timing == EvictionTiming::AfterInsert && self.store.is_over_capacity() {
            if !self.evict_one(&key) {
                break;
            }
        }

        #[cfg(debug_assertions)]
        self.validate_invariants();
        None
    }

    /// Removes at most one victim chosen by the policy.
    fn evict_one(&mut self, incoming: &K) -> bool {
        let Some(victim) = self.policy.select_victim(incoming) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction_skipped();
            debug!(
                policy = self.policy.name(),
                len = self.store.len(),
                capacity = self.store.capacity(),
                "over capacity but no eviction victim available"
            );
            return false;
        };

        self.store.remove(&victim);
        self.policy.record_removal(&victim);
        #[cfg(feature = "metrics")]
        self.metrics.record_eviction();
        trace!(policy = self.policy.name(), "evicted one entry");

        self.sink.discard(&victim);
        true
    }

    /// Returns the value for `key` and records the access with the policy.
    ///
    /// A miss has no side effects on the trackers.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if !self.store.contains(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        }
        self.policy.record_access(key);
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.store.get(key)
    }

    /// Returns the value for `key` without recording an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.store.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Drops every entry and all tracked state. No discard notifications are
    /// emitted.
    pub fn clear(&mut self) {
        self.store.clear();
        self.policy.clear();
    }

    /// Name of the active policy (`"fifo"`, `"lfu"`, `"mru"`).
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Checks that the trackers agree with the store.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.policy.check_invariants(&self.store)
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("cache invariant violated: {}", e);
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P, S> Cache<K, V, P, S>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy<K>,
    S: DiscardSink<K>,
{
    /// Returns a snapshot of cache metrics.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.store.len(), self.store.capacity())
    }
}

impl<K, V, P, S> std::fmt::Debug for Cache<K, V, P, S>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy<K>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &self.policy.name())
            .field("capacity", &self.store.capacity())
            .field("len", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl<K, V, P, S> ReadOnlyCache<K, V> for Cache<K, V, P, S>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy<K>,
    S: DiscardSink<K>,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        Cache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        Cache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        Cache::capacity(self)
    }
}

impl<K, V, P, S> CoreCache<K, V> for Cache<K, V, P, S>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy<K>,
    S: DiscardSink<K>,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        Cache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        Cache::get(self, key)
    }

    fn clear(&mut self) {
        Cache::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::fifo::FifoPolicy;
    use crate::sink::RecordingSink;

    type Key = &'static str;
    type TestCache = Cache<Key, i32, FifoPolicy<Key>, RecordingSink<Key>>;

    fn fifo(capacity: usize) -> (TestCache, RecordingSink<Key>) {
        let sink = RecordingSink::new();
        let cache = Cache::from_parts(capacity, FifoPolicy::new(), sink.clone());
        (cache, sink)
    }

    mod basic_operations {
        use super::*;

        #[test]
        fn put_then_get_round_trips() {
            let (mut cache, _) = fifo(4);
            cache.put(Some("a"), Some(1));
            assert_eq!(cache.get(&"a"), Some(&1));
            assert_eq!(cache.peek(&"a"), Some(&1));
        }

        #[test]
        fn insert_returns_previous_value() {
            let (mut cache, sink) = fifo(2);
            assert_eq!(cache.insert("a", 1), None);
            assert_eq!(cache.insert("a", 2), Some(1));
            assert_eq!(cache.len(), 1);
            assert!(sink.is_empty());
        }

        #[test]
        fn clear_is_silent() {
            let (mut cache, sink) = fifo(2);
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.clear();

            assert!(cache.is_empty());
            assert!(sink.is_empty());
            cache.check_invariants().unwrap();
        }

        #[test]
        fn zero_capacity_is_a_config_error() {
            let result: Result<Cache<u32, u32, FifoPolicy<u32>, RecordingSink<u32>>, _> =
                Cache::try_from_parts(0, FifoPolicy::new(), RecordingSink::new());
            assert!(result.is_err());
        }

        #[test]
        fn debug_output_names_policy() {
            let (cache, _) = fifo(3);
            let dbg = format!("{:?}", cache);
            assert!(dbg.contains("fifo"));
            assert!(dbg.contains("capacity: 3"));
        }
    }

    mod null_guard {
        use super::*;

        #[test]
        fn missing_key_or_value_is_ignored() {
            let (mut cache, sink) = fifo(1);
            cache.put(Some("a"), Some(1));

            cache.put(None, Some(2));
            cache.put(Some("b"), None);
            cache.put(None, None);

            assert_eq!(cache.len(), 1);
            assert!(sink.is_empty());
            assert!(!cache.contains(&"b"));
        }

        #[test]
        fn missing_value_does_not_touch_resident_key() {
            let (mut cache, _) = fifo(2);
            cache.put(Some("a"), Some(1));
            cache.put(Some("a"), None);
            assert_eq!(cache.get(&"a"), Some(&1));
        }
    }

    mod trait_access {
        use super::*;

        #[test]
        fn core_cache_delegates() {
            let (mut cache, _) = fifo(2);
            assert_eq!(CoreCache::insert(&mut cache, "k", 1), None);
            assert_eq!(CoreCache::insert(&mut cache, "k", 2), Some(1));
            assert_eq!(CoreCache::get(&mut cache, &"k"), Some(&2));
            assert!(ReadOnlyCache::contains(&cache, &"k"));
            assert_eq!(ReadOnlyCache::capacity(&cache), 2);
            assert!(!ReadOnlyCache::is_empty(&cache));
            CoreCache::clear(&mut cache);
            assert_eq!(ReadOnlyCache::len(&cache), 0);
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;
        use crate::policy::lfu::LfuPolicy;

        #[test]
        fn counters_follow_operations() {
            let (mut cache, _) = fifo(1);
            cache.put(Some("a"), Some(1));
            cache.put(Some("a"), Some(2));
            cache.put(None, Some(3));
            cache.put(Some("b"), Some(4));
            cache.get(&"b");
            cache.get(&"a");

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.put_calls, 4);
            assert_eq!(snap.puts_ignored, 1);
            assert_eq!(snap.insert_new, 2);
            assert_eq!(snap.insert_updates, 1);
            assert_eq!(snap.evictions, 1);
            assert_eq!(snap.get_hits, 1);
            assert_eq!(snap.get_misses, 1);
            assert_eq!(snap.cache_len, 1);
            assert_eq!(snap.capacity, 1);
        }

        #[test]
        fn skipped_eviction_is_counted() {
            let sink = RecordingSink::new();
            let mut cache = Cache::from_parts(1, LfuPolicy::new(), sink.clone());
            cache.insert("a", 1);
            cache.insert("b", 2);

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.evictions, 0);
            assert_eq!(snap.evictions_skipped, 1);
            assert!(sink.is_empty());
        }

        #[test]
        fn after_insert_drain_counts_every_eviction() {
            let sink = RecordingSink::new();
            let mut cache = Cache::from_parts(1, LfuPolicy::new(), sink.clone());
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.insert("c", 3);
            assert_eq!(cache.len(), 3);

            cache.get(&"a");
            cache.insert("d", 4);

            // unread b and c go first, then a once it is the only candidate
            assert_eq!(sink.keys(), vec!["b", "c", "a"]);
            assert_eq!(cache.len(), 1);
            assert!(cache.contains(&"d"));
            let snap = cache.metrics_snapshot();
            assert_eq!(snap.evictions, 3);
            assert_eq!(snap.evictions_skipped, 2);
            cache.check_invariants().unwrap();
        }
    }
}
