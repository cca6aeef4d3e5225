pub use crate::builder::{CacheBuilder, CachePolicy, PolicyCache, DEFAULT_MAX_ITEMS};
pub use crate::cache::Cache;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::mru::MruCache;
pub use crate::policy::{EvictionPolicy, EvictionTiming, FifoPolicy, LfuPolicy, MruPolicy};
pub use crate::sink::{DiscardSink, NoopSink, RecordingSink, StdoutSink, TracingSink};
#[cfg(feature = "concurrency")]
pub use crate::sync::ConcurrentCache;
pub use crate::traits::{CoreCache, ReadOnlyCache};
