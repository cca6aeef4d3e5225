//! Per-key access counters for LFU eviction.
//!
//! A counter is created at 1 on the first successful `get` of a key and
//! incremented on each later one. Keys without a counter compare as
//! frequency 0.
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::InvariantError;

#[derive(Debug)]
pub struct FrequencyTracker<K> {
    counts: FxHashMap<K, u64>,
}

impl<K> FrequencyTracker<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Bumps the counter for `key` and returns the new frequency.
    pub fn increment(&mut self, key: &K) -> u64 {
        let count = self.counts.entry(key.clone()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Frequency of `key`; untracked keys report 0.
    pub fn frequency(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn remove(&mut self, key: &K) -> Option<u64> {
        self.counts.remove(key)
    }

    /// Smallest frequency among `keys`, counting untracked keys as 0.
    pub fn min_frequency_among<'a, I>(&self, keys: I) -> Option<u64>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        keys.into_iter().map(|key| self.frequency(key)).min()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(key, &count)| (key, count))
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.counts.values().any(|&count| count == 0) {
            return Err(InvariantError::new("frequency tracker holds a zero counter"));
        }
        Ok(())
    }
}

impl<K> Default for FrequencyTracker<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
