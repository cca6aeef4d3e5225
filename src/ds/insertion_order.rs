//! Insertion-order tracking for FIFO and MRU eviction.
//!
//! Records the order in which keys were first placed into the store. A key
//! that is put again while still resident keeps its original rank; only
//! removal (eviction) takes it out of the sequence.
//!
//! ```text
//!   record_insert(a), record_insert(b), record_insert(c), record_insert(a)
//!
//!   oldest ─► [a] ─ [b] ─ [c] ◄─ newest      (a keeps rank 0)
//! ```
use std::hash::Hash;

use crate::ds::intrusive_list::IntrusiveListIter;
use crate::ds::key_order::KeyOrder;
use crate::error::InvariantError;

/// Tracks first-insertion order of resident keys.
#[derive(Debug)]
pub struct InsertionOrderTracker<K> {
    order: KeyOrder<K>,
}

impl<K> InsertionOrderTracker<K>
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

    /// Records `key` as newest if it is not tracked yet.
    ///
    /// Returns `false` for a key that is already tracked; its rank is kept.
    pub fn record_insert(&mut self, key: &K) -> bool {
        if self.order.contains(key) {
            return false;
        }
        self.order.push_back(key.clone())
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.order.remove(key)
    }

    /// The key inserted longest ago that is still tracked.
    pub fn oldest(&self) -> Option<&K> {
        self.order.front()
    }

    /// The key inserted most recently.
    pub fn newest(&self) -> Option<&K> {
        self.order.back()
    }

    /// Zero-based insertion rank (0 = oldest).
    pub fn rank(&self, key: &K) -> Option<usize> {
        self.order.position(key)
    }

    /// Iterates oldest to newest.
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

impl<K> Default for InsertionOrderTracker<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
