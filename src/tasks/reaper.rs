//! Cache Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Handle to a running reaper task.
///
/// Dropping the handle closes the shutdown channel, which stops the task on
/// its next wake. [`ReaperHandle::shutdown`] does the same and waits for the
/// task to exit.
#[derive(Debug)]
pub struct ReaperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signals the reaper to stop and waits until it has exited.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(err) = self.task.await {
            debug!("Reaper task ended abnormally: {}", err);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns a background task that sweeps `store` every `period`.
///
/// The first sweep runs one full period after spawning. Each sweep takes the
/// store's lock, removes entries older than the store's interval and releases
/// the lock. The task exits when the returned handle is shut down or dropped.
///
/// # Panics
/// Panics if called outside a Tokio runtime or if `period` is zero.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new(Duration::from_secs(5))));
/// let reaper = spawn_reaper(store.clone(), Duration::from_secs(5));
/// // Later, when the cache owner goes away:
/// reaper.shutdown().await;
/// ```
pub fn spawn_reaper(store: Arc<Mutex<CacheStore>>, period: Duration) -> ReaperHandle {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!("Starting cache reaper with period of {:?}", period);

        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if *shutdown_rx.borrow() {
                        break;
                    }

                    let (removed, remaining) = {
                        let mut guard = store.lock().await;
                        let removed = guard.reap();
                        (removed, guard.len())
                    };

                    if removed > 0 {
                        debug!(removed, remaining, "Cache sweep removed expired entries");
                    } else {
                        debug!(remaining, "Cache sweep found no expired entries");
                    }
                }
                changed = shutdown_rx.changed() => {
                    // A closed channel means the owner is gone
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Cache reaper stopped");
    });

    ReaperHandle { shutdown_tx, task }
}
