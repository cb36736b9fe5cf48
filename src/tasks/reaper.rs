//! TTL Reaper Task
//!
//! Background task that periodically sweeps stale entries out of a cache.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::WeakTtlCache;

/// Spawns the reclamation task for one cache.
///
/// The task idles until the next tick of a timer whose period equals the
/// cache TTL, then sweeps. It exits when `shutdown` is cancelled or when no
/// strong handle to the cache remains.
///
/// # Arguments
/// * `cache` - weak handle to the cache being swept
/// * `period` - interval between sweeps (the cache TTL)
/// * `shutdown` - stop signal checked while idle
///
/// # Returns
/// A JoinHandle for the spawned task.
pub fn spawn_reaper_task(
    cache: WeakTtlCache,
    period: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(period_ms = period.as_millis() as u64, "starting cache reaper");

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; nothing can be stale yet.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("cache reaper stopped");
                    break;
                }
                _ = ticker.tick() => {}
            }

            let Some(cache) = cache.upgrade() else {
                debug!("cache dropped, reaper exiting");
                break;
            };

            let removed = cache.sweep();
            if removed > 0 {
                info!(removed, remaining = cache.len(), "cache sweep removed stale entries");
            } else {
                debug!("cache sweep: no stale entries");
            }
        }
    })
}
