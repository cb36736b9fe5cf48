//! Cache Entry Module
//!
//! Defines a single cached response body and the instant it was stored.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry: an opaque payload plus its insertion time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload (a serialized response body, by convention)
    pub payload: Vec<u8>,
    /// Insertion instant (monotonic clock)
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Returns how long the entry has existed as of `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Stale ==
    /// Checks whether the entry has outlived `ttl` as of `now`.
    ///
    /// Boundary condition: an entry whose age equals `ttl` exactly is still
    /// live. It becomes stale only once its age strictly exceeds `ttl`.
    pub fn is_stale(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) > ttl
    }
}
