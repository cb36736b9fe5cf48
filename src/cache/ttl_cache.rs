//! Shared TTL Cache
//!
//! Thread-safe handle over a [`CacheStore`] that owns its background
//! reclamation task.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::tasks::spawn_reaper_task;

struct Shared {
    store: Mutex<CacheStore>,
    ttl: Duration,
    shutdown: CancellationToken,
    reaper: Mutex<Option<JoinHandle<()>>>,
}

// == TTL Cache ==
/// Key-value cache whose entries expire a fixed interval after insertion.
///
/// Cloning yields another handle to the same entries. Every handle shares a
/// single reclamation task, started by [`TtlCache::new`], which sweeps stale
/// entries once per TTL period until [`TtlCache::shutdown`] is called or the
/// last handle is dropped.
///
/// # Example
/// ```ignore
/// let cache = TtlCache::new(Duration::from_secs(3));
/// cache.put("https://pokeapi.co/api/v2/location-area/", body);
/// if let Some(bytes) = cache.get("https://pokeapi.co/api/v2/location-area/") {
///     // decode bytes instead of hitting the network
/// }
/// cache.shutdown().await;
/// ```
#[derive(Clone)]
pub struct TtlCache {
    shared: Arc<Shared>,
}

/// Non-owning handle held by the reclamation task.
#[derive(Clone)]
pub struct WeakTtlCache {
    shared: Weak<Shared>,
}

impl WeakTtlCache {
    pub fn upgrade(&self) -> Option<TtlCache> {
        self.shared.upgrade().map(|shared| TtlCache { shared })
    }
}

impl TtlCache {
    // == Constructor ==
    /// Creates an empty cache and starts its reclamation task.
    ///
    /// Must be called from within a tokio runtime. Does not block.
    ///
    /// # Panics
    /// Panics if `ttl` is zero.
    pub fn new(ttl: Duration) -> Self {
        assert!(!ttl.is_zero(), "cache ttl must be strictly positive");

        let cache = Self {
            shared: Arc::new(Shared {
                store: Mutex::new(CacheStore::new(ttl)),
                ttl,
                shutdown: CancellationToken::new(),
                reaper: Mutex::new(None),
            }),
        };

        let handle = spawn_reaper_task(cache.downgrade(), ttl, cache.shared.shutdown.clone());
        *lock(&cache.shared.reaper) = Some(handle);

        cache
    }

    pub fn ttl(&self) -> Duration {
        self.shared.ttl
    }

    pub fn downgrade(&self) -> WeakTtlCache {
        WeakTtlCache {
            shared: Arc::downgrade(&self.shared),
        }
    }

    // == Put ==
    /// Stores `payload` under `key`, replacing any existing entry and
    /// restarting its lifetime.
    pub fn put(&self, key: impl Into<String>, payload: impl Into<Vec<u8>>) {
        let key = key.into();
        debug!(key = %key, "cache put");
        lock(&self.shared.store).set(key, payload.into());
    }

    // == Get ==
    /// Returns a copy of the payload stored under `key`, if any live entry
    /// exists.
    ///
    /// `None` covers both "never stored" and "already expired".
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let payload = lock(&self.shared.store).get(key);
        debug!(key = %key, hit = payload.is_some(), "cache get");
        payload
    }

    // == Sweep ==
    /// Removes every entry older than the TTL. Returns the number removed.
    ///
    /// The key set is copied under the guard, then each key is checked and
    /// removed under its own short guard acquisition, so concurrent
    /// `put`/`get` calls interleave with the sweep. A key re-written after the
    /// snapshot is judged by its new insertion instant.
    pub fn sweep(&self) -> usize {
        let keys = lock(&self.shared.store).keys();

        let removed = keys
            .iter()
            .filter(|key| lock(&self.shared.store).remove_if_stale(key, Instant::now()))
            .count();

        lock(&self.shared.store).record_sweep();
        removed
    }

    pub fn stats(&self) -> CacheStats {
        lock(&self.shared.store).stats()
    }

    pub fn len(&self) -> usize {
        lock(&self.shared.store).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.shared.store).is_empty()
    }

    // == Shutdown ==
    /// Stops the reclamation task and waits for it to finish.
    ///
    /// Entries remain readable afterwards; they are simply no longer swept.
    /// Calling this more than once is harmless.
    pub async fn shutdown(&self) {
        self.shared.shutdown.cancel();
        let handle = lock(&self.shared.reaper).take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                debug!(error = %err, "reaper task ended abnormally");
            }
        }
    }

    /// Returns true once the reclamation task has exited.
    pub fn is_reaper_finished(&self) -> bool {
        lock(&self.shared.reaper)
            .as_ref()
            .map_or(true, JoinHandle::is_finished)
    }
}

impl std::fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.shared.ttl)
            .field("len", &self.len())
            .finish()
    }
}

// Each critical section is a single map operation, so the data behind a
// poisoned guard is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
