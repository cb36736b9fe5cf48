//! Cache Store Module
//!
//! Single-threaded storage core: a HashMap of entries, the fixed TTL, and
//! statistics. [`TtlCache`](crate::cache::TtlCache) wraps it in a mutex.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Entry storage with a fixed TTL.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup and removal counters
    stats: CacheStats,
    /// Lifetime of every entry
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::default(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Set ==
    /// Stores a payload under `key`.
    ///
    /// If the key already exists, the payload is overwritten and the entry's
    /// age restarts from zero. Keys are stored exactly as given.
    pub fn set(&mut self, key: String, payload: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(payload));
    }

    // == Get ==
    /// Retrieves a copy of the payload stored under `key`.
    ///
    /// An entry older than the TTL is removed on the spot and reported as a
    /// miss, so a lookup never returns a payload past its lifetime even when
    /// the background sweep has not reached it yet.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        let now = Instant::now();
        match self.entries.get(key) {
            Some(entry) if !entry.is_stale(self.ttl, now) => {
                let payload = entry.payload.clone();
                self.stats.hits += 1;
                Some(payload)
            }
            Some(_) => {
                self.entries.remove(key);
                self.stats.dropped_on_read += 1;
                self.stats.misses += 1;
                None
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    // == Remove If Stale ==
    /// Removes the entry for `key` if, as of `now`, it has outlived the TTL.
    ///
    /// Age is computed against whatever entry is stored at call time, so an
    /// entry overwritten since a key snapshot was taken is judged by its new
    /// insertion instant.
    pub fn remove_if_stale(&mut self, key: &str, now: Instant) -> bool {
        let stale = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_stale(self.ttl, now));

        if stale {
            self.entries.remove(key);
            self.stats.swept += 1;
        }
        stale
    }

    /// Returns the insertion instant of the entry under `key`, stale or not.
    pub fn created_at(&self, key: &str) -> Option<Instant> {
        self.entries.get(key).map(|entry| entry.created_at)
    }

    /// Counts one completed sweep.
    pub fn record_sweep(&mut self) {
        self.stats.sweeps += 1;
    }

    // == Keys ==
    /// Returns a snapshot of the current key set.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            ..self.stats
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
