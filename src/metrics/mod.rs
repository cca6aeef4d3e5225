//! Per-cache operation counters (feature `metrics`).
//!
//! Counters are plain `u64`s owned by the cache; they are observational and
//! never influence eviction.

pub mod snapshot;

pub use snapshot::CacheMetricsSnapshot;

#[derive(Debug, Default, Clone)]
pub(crate) struct CacheMetrics {
    pub get_hits: u64,
    pub get_misses: u64,
    pub put_calls: u64,
    pub puts_ignored: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub evictions: u64,
    pub evictions_skipped: u64,
}

impl CacheMetrics {
    #[inline]
    pub fn record_get_hit(&mut self) {
        self.get_hits += 1;
    }

    #[inline]
    pub fn record_get_miss(&mut self) {
        self.get_misses += 1;
    }

    #[inline]
    pub fn record_put_call(&mut self) {
        self.put_calls += 1;
    }

    #[inline]
    pub fn record_put_ignored(&mut self) {
        self.puts_ignored += 1;
    }

    #[inline]
    pub fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    #[inline]
    pub fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    #[inline]
    pub fn record_eviction_skipped(&mut self) {
        self.evictions_skipped += 1;
    }

    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.get_hits + self.get_misses,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            put_calls: self.put_calls,
            puts_ignored: self.puts_ignored,
            insert_new: self.insert_new,
            insert_updates: self.insert_updates,
            evictions: self.evictions,
            evictions_skipped: self.evictions_skipped,
            cache_len,
            capacity,
        }
    }
}
