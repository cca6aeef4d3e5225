//! Ordered key set: an [`IntrusiveList`] of keys plus a key → `SlotId` index.
//!
//! Each key appears at most once. The head is the oldest position and the
//! tail the newest. Both insertion-order and access-order tracking are built
//! on top of this type.
//!
//! | Operation      | Time |
//! |----------------|------|
//! | `push_back`    | O(1) |
//! | `move_to_back` | O(1) |
//! | `remove`       | O(1) |
//! | `position`     | O(n) |
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::{IntrusiveList, IntrusiveListIter};
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;

#[derive(Debug)]
pub struct KeyOrder<K> {
    list: IntrusiveList<K>,
    index: FxHashMap<K, SlotId>,
}

impl<K> KeyOrder<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            list: IntrusiveList::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Appends `key` at the tail. Returns `false` and leaves the order
    /// untouched if the key is already present.
    pub fn push_back(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let id = self.list.push_back(key.clone());
        self.index.insert(key, id);
        true
    }

    /// Moves `key` to the tail, appending it if absent.
    pub fn move_to_back(&mut self, key: &K) {
        match self.index.get(key) {
            Some(&id) => {
                self.list.move_to_back(id);
            },
            None => {
                self.push_back(key.clone());
            },
        }
    }

    /// Removes `key`; returns `true` if it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(id) => self.list.remove(id).is_some(),
            None => false,
        }
    }

    pub fn front(&self) -> Option<&K> {
        self.list.front()
    }

    pub fn back(&self) -> Option<&K> {
        self.list.back()
    }

    /// Iterates from the head (oldest) to the tail (newest).
    pub fn iter(&self) -> IntrusiveListIter<'_, K> {
        self.list.iter()
    }

    /// Zero-based distance of `key` from the head.
    pub fn position(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        self.list.iter().position(|k| k == key)
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;
        if self.list.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "key order list holds {} nodes but index holds {} keys",
                self.list.len(),
                self.index.len()
            )));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some(stored) if stored == key => {},
                _ => {
                    return Err(InvariantError::new(format!(
                        "index slot {:?} does not hold its key",
                        id
                    )))
                },
            }
        }
        Ok(())
    }
}

impl<K> Default for KeyOrder<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
