//! Access-order tracking.
//!
//! Every successful `get` moves the key to the most-recent end. A key appears
//! at most once; keys that were never read are not tracked at all. The LFU
//! policy scans this sequence oldest-first to break frequency ties.
use std::hash::Hash;

use crate::ds::intrusive_list::IntrusiveListIter;
use crate::ds::key_order::KeyOrder;
use crate::error::InvariantError;

/// Tracks the order of key accesses, least recent first.
#[derive(Debug)]
pub struct RecencyTracker<K> {
    order: KeyOrder<K>,
}

impl<K> RecencyTracker<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            order: KeyOrder::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: KeyOrder::with_capacity(capacity),
        }
    }

    /// Marks `key` as the most recently accessed, dropping any earlier
    /// occurrence.
    pub fn touch(&mut self, key: &K) {
        self.order.move_to_back(key);
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.order.remove(key)
    }

    pub fn least_recent(&self) -> Option<&K> {
        self.order.front()
    }

    pub fn most_recent(&self) -> Option<&K> {
        self.order.back()
    }

    /// First key, scanning from least to most recent, accepted by `pred`.
    pub fn first_matching<F>(&self, mut pred: F) -> Option<&K>
    where
        F: FnMut(&K) -> bool,
    {
        self.order.iter().find(|key| pred(*key))
    }

    /// Iterates least recent to most recent.
    pub fn iter(&self) -> IntrusiveListIter<'_, K> {
        self.order.iter()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.order.contains(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.check_invariants()
    }
}

impl<K> Default for RecencyTracker<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(tracker: &RecencyTracker<&'static str>) -> Vec<&'static str> {
        tracker.iter().copied().collect()
    }

    #[test]
    fn touch_moves_to_most_recent() {
        let mut tracker = RecencyTracker::new();
        tracker.touch(&"a");
        tracker.touch(&"b");
        tracker.touch(&"c");
        tracker.touch(&"a");

        assert_eq!(order(&tracker), vec!["b", "c", "a"]);
        assert_eq!(tracker.least_recent(), Some(&"b"));
        assert_eq!(tracker.most_recent(), Some(&"a"));
        assert_eq!(tracker.len(), 3);
        tracker.check_invariants().unwrap();
    }

    #[test]
    fn first_matching_scans_oldest_first() {
        let mut tracker = RecencyTracker::with_capacity(4);
        for key in ["a", "b", "c", "d"] {
            tracker.touch(&key);
        }

        let candidates = ["c", "b"];
        assert_eq!(
            tracker.first_matching(|k| candidates.contains(k)),
            Some(&"b")
        );
        assert_eq!(tracker.first_matching(|k| *k == "z"), None);
    }

    #[test]
    fn remove_drops_key() {
        let mut tracker = RecencyTracker::new();
        tracker.touch(&1);
        tracker.touch(&2);

        assert!(tracker.remove(&1));
        assert!(!tracker.contains(&1));
        assert_eq!(tracker.least_recent(), Some(&2));
        assert!(!tracker.remove(&1));

        tracker.clear();
        assert!(tracker.is_empty());
        tracker.check_invariants().unwrap();
    }
}
