//! Cache Module
//!
//! Provides an in-memory response cache whose entries expire a fixed
//! interval after insertion, reclaimed by a background sweep.

mod entry;
mod stats;
mod store;
mod ttl_cache;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use ttl_cache::{TtlCache, WeakTtlCache};

// == Public Constants ==
/// TTL used when none is configured
pub const DEFAULT_TTL_MS: u64 = 3_000;
