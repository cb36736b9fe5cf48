//! Cache Statistics Module
//!
//! Counters kept by [`CacheStore`](crate::cache::CacheStore) and copied out
//! as a snapshot by `stats()`.

/// Snapshot of cache activity since construction.
///
/// Stale entries leave the cache by one of two paths: a lookup that finds
/// them past their TTL (`dropped_on_read`) or a background sweep (`swept`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a live entry
    pub hits: u64,
    /// Lookups that found nothing live
    pub misses: u64,
    /// Stale entries removed by the lookup that found them
    pub dropped_on_read: u64,
    /// Stale entries removed by background sweeps
    pub swept: u64,
    /// Completed sweeps
    pub sweeps: u64,
    /// Entries held when the snapshot was taken
    pub total_entries: usize,
}

impl CacheStats {
    /// All entries removed for outliving the TTL, by either path.
    pub fn expired(&self) -> u64 {
        self.dropped_on_read + self.swept
    }

    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, or `None` before the first lookup.
    pub fn hit_rate(&self) -> Option<f64> {
        match self.lookups() {
            0 => None,
            lookups => Some(self.hits as f64 / lookups as f64),
        }
    }
}
