//! Discard notifications.
//!
//! Every eviction is reported exactly once to the cache's [`DiscardSink`],
//! after the victim has left the store and all trackers. The canonical
//! human-readable form is `DISCARD: <key>`; [`StdoutSink`] writes that line to
//! standard output and [`TracingSink`] emits it as a `tracing` event.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::fifo::FifoCache;
//! use evictkit::sink::RecordingSink;
//!
//! let sink = RecordingSink::new();
//! let mut cache = FifoCache::with_sink(1, sink.clone());
//! cache.put(Some("a"), Some(1));
//! cache.put(Some("b"), Some(2));
//!
//! assert_eq!(sink.keys(), vec!["a"]);
//! ```
use std::fmt::Display;
use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Receives the key of every evicted entry.
pub trait DiscardSink<K> {
    fn discard(&mut self, key: &K);
}

impl<K, F> DiscardSink<K> for F
where
    F: FnMut(&K),
{
    fn discard(&mut self, key: &K) {
        self(key)
    }
}

/// Formats the notification line for `key`, without the trailing newline.
pub fn format_discard<K: Display + ?Sized>(key: &K) -> String {
    format!("DISCARD: {}", key)
}

/// Writes the notification line for `key`, newline included, to `out`.
pub fn write_discard<W, K>(out: &mut W, key: &K) -> std::io::Result<()>
where
    W: Write + ?Sized,
    K: Display + ?Sized,
{
    writeln!(out, "{}", format_discard(key))
}

/// Writes `DISCARD: <key>` lines to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl<K: Display> DiscardSink<K> for StdoutSink {
    fn discard(&mut self, key: &K) {
        let mut out = std::io::stdout().lock();
        // evictions never panic on a closed stdout
        let _ = write_discard(&mut out, key);
    }
}

/// Emits each notification as an INFO event on target `evictkit::discard`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl<K: Display> DiscardSink<K> for TracingSink {
    fn discard(&mut self, key: &K) {
        tracing::info!(target: "evictkit::discard", key = %key, "{}", format_discard(key));
    }
}

/// Ignores notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl<K> DiscardSink<K> for NoopSink {
    fn discard(&mut self, _key: &K) {}
}

/// Collects victim keys in eviction order.
///
/// Clones share one buffer, so a clone handed to a cache can be inspected
/// from the outside.
#[derive(Debug)]
pub struct RecordingSink<K> {
    keys: Arc<Mutex<Vec<K>>>,
}

impl<K> RecordingSink<K> {
    pub fn new() -> Self {
        Self {
            keys: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of the recorded keys, oldest eviction first.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.keys.lock().clone()
    }

    /// Most recent victim.
    pub fn last(&self) -> Option<K>
    where
        K: Clone,
    {
        self.keys.lock().last().cloned()
    }

    /// Drains the recorded keys.
    pub fn take(&self) -> Vec<K> {
        std::mem::take(&mut *self.keys.lock())
    }

    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.lock().is_empty()
    }
}

impl<K> Clone for RecordingSink<K> {
    fn clone(&self) -> Self {
        Self {
            keys: Arc::clone(&self.keys),
        }
    }
}

impl<K> Default for RecordingSink<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> DiscardSink<K> for RecordingSink<K> {
    fn discard(&mut self, key: &K) {
        self.keys.lock().push(key.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::fifo::FifoCache;

    #[test]
    fn discard_line_format_is_verbatim() {
        assert_eq!(format_discard(&"A"), "DISCARD: A");
        assert_eq!(format_discard("key-1"), "DISCARD: key-1");
        assert_eq!(format_discard(&42), "DISCARD: 42");
    }

    #[test]
    fn recording_sink_clones_share_buffer() {
        let sink = RecordingSink::new();
        let mut handle = sink.clone();
        handle.discard(&"a");
        handle.discard(&"b");

        assert_eq!(sink.keys(), vec!["a", "b"]);
        assert_eq!(sink.last(), Some("b"));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.take(), vec!["a", "b"]);
        assert!(sink.is_empty());
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |key: &u32| seen.push(*key);
            sink.discard(&3u32);
            sink.discard(&5u32);
        }
        assert_eq!(seen, vec![3, 5]);
    }

    #[test]
    fn discard_line_bytes() {
        let mut buf: Vec<u8> = Vec::new();
        write_discard(&mut buf, &"a").unwrap();
        assert_eq!(buf, b"DISCARD: a\n");

        write_discard(&mut buf, &42u32).unwrap();
        write_discard(&mut buf, "multi word").unwrap();
        assert_eq!(buf, b"DISCARD: a\nDISCARD: 42\nDISCARD: multi word\n");
    }

    #[test]
    fn discard_line_through_dyn_writer() {
        let mut buf: Vec<u8> = Vec::new();
        {
            let out: &mut dyn Write = &mut buf;
            write_discard(out, &'x').unwrap();
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "DISCARD: x\n");
    }

    #[test]
    fn noop_sink_leaves_cache_behavior_unchanged() {
        let mut cache = FifoCache::with_sink(1, NoopSink);
        cache.put(Some("a"), Some(1));
        cache.put(Some("b"), Some(2));
        assert!(!cache.contains(&"a"));
        assert_eq!(cache.get(&"b"), Some(&2));
    }
}
