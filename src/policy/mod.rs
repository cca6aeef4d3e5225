//! Eviction policies.
//!
//! A policy owns the trackers it needs and answers one question: which
//! resident key should leave when the store is over budget. It never touches
//! values; [`Cache`](crate::cache::Cache) drives it through the hooks below
//! and performs the removal.
//!
//! | Policy | Trackers                        | Checked        | Victim                          |
//! |--------|---------------------------------|----------------|---------------------------------|
//! | FIFO   | insertion order                 | before insert  | oldest inserted                 |
//! | MRU    | insertion order                 | before insert  | newest inserted                 |
//! | LFU    | frequency, access, insertion    | after insert   | lowest frequency, LRU tie-break |

pub mod fifo;
pub mod lfu;
pub mod mru;

use std::hash::Hash;

use crate::error::InvariantError;
use crate::store::bounded::BoundedCache;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use mru::MruPolicy;

/// When the capacity check runs relative to storing a new key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionTiming {
    /// Evict while `len >= capacity`, then store the new key.
    BeforeInsert,
    /// Store the new key, then evict while `len > capacity`.
    AfterInsert,
}

/// Victim selection plus the bookkeeping that feeds it.
///
/// Hooks are only called for keys that are (or just became) resident, so a
/// policy's tracked keys are always a subset of the store's keys.
pub trait EvictionPolicy<K>
where
    K: Clone + Eq + Hash,
{
    /// Short policy name used in logs and snapshots.
    fn name(&self) -> &'static str;

    fn timing(&self) -> EvictionTiming;

    /// A key that was not resident has been stored.
    fn record_insert(&mut self, key: &K);

    /// A resident key had its value replaced.
    fn record_update(&mut self, _key: &K) {}

    /// A resident key was read through `get`.
    fn record_access(&mut self, key: &K);

    /// A key left the store.
    fn record_removal(&mut self, key: &K);

    /// Picks the key to evict. `incoming` is the key whose insertion caused
    /// the check; it is never returned.
    ///
    /// `None` means the policy has nothing to offer and the cache stays as is.
    fn select_victim(&self, incoming: &K) -> Option<K>;

    /// Drops all tracked state.
    fn clear(&mut self);

    /// Verifies that every tracked key is resident in `store` and that the
    /// trackers are internally consistent.
    fn check_invariants<V>(&self, store: &BoundedCache<K, V>) -> Result<(), InvariantError>;
}

/// Shared subset check for tracker contents.
pub(crate) fn ensure_resident<'a, K, V, I>(
    tracker: &str,
    keys: I,
    store: &BoundedCache<K, V>,
) -> Result<(), InvariantError>
where
    K: Eq + Hash + 'a,
    I: IntoIterator<Item = &'a K>,
{
    let stale = keys.into_iter().filter(|key| !store.contains(key)).count();
    if stale > 0 {
        return Err(InvariantError::new(format!(
            "{} tracks {} key(s) missing from the store",
            tracker, stale
        )));
    }
    Ok(())
}
