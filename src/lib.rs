//! evictkit: fixed-capacity caches with FIFO, LFU, and MRU eviction.
//!
//! Every cache is a [`Cache`](cache::Cache) over a bounded store, one
//! [`EvictionPolicy`](policy::EvictionPolicy), and a
//! [`DiscardSink`](sink::DiscardSink) that hears about each eviction.
//!
//! ## Victim Selection
//!
//! Eviction only happens when a put stores a key that is not yet resident.
//! Replacing a resident value never evicts, and the incoming key is never a
//! victim.
//!
//! | Policy | Checked                         | Victim                                                        |
//! |--------|---------------------------------|---------------------------------------------------------------|
//! | FIFO   | before insert, `len >= cap`     | oldest first insertion                                        |
//! | MRU    | before insert, `len >= cap`     | newest first insertion; `get` never changes rank              |
//! | LFU    | after insert, while `len > cap` | lowest read count (never read = 0), least recently read first |
//!
//! LFU falls back in two steps:
//!
//! - if no minimum-count candidate has been read, the candidate inserted
//!   first is evicted;
//! - if no resident key has ever been read, nothing is evicted and the cache
//!   stays over capacity until an insert that follows a successful `get`.
//!
//! ```
//! use evictkit::policy::lfu::LfuCache;
//! use evictkit::sink::RecordingSink;
//!
//! let sink = RecordingSink::new();
//! let mut cache = LfuCache::with_sink(2, sink.clone());
//! cache.put(Some("a"), Some(1));
//! cache.put(Some("b"), Some(2));
//! cache.put(Some("c"), Some(3));
//! assert_eq!(cache.len(), 3);
//!
//! cache.get(&"a");
//! cache.put(Some("d"), Some(4));
//! assert_eq!(sink.keys(), vec!["b", "c"]);
//! assert_eq!(cache.len(), 2);
//! ```

pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;
pub mod pagination;
pub mod policy;
pub mod sink;
pub mod store;

#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(feature = "concurrency")]
pub mod sync;

pub mod prelude;
pub mod traits;
pub use crate::ds::{
    FrequencyTracker, InsertionOrderTracker, IntrusiveList, KeyOrder, RecencyTracker, SlotArena,
    SlotId,
};

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CacheMetricsSnapshot;
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::mru::MruCache;
