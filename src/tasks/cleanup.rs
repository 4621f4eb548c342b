//! Expiry Sweep Task
//!
//! Background task that periodically removes expired pools. Expiry is also
//! checked lazily on access; the sweep keeps memory accounting honest for
//! pools nobody asks for again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::pool::PoolStore;

/// Spawns a background task that periodically sweeps expired pools.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. It acquires a write lock on the store to remove expired
/// entries.
///
/// # Arguments
/// * `store` - Shared reference to the pool store
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(
    store: Arc<RwLock<PoolStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting pool expiry sweep with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut store_guard = store.write().await;
                store_guard.cleanup_expired()
            };

            if removed > 0 {
                info!("Expiry sweep: removed {} stale pools", removed);
            } else {
                debug!("Expiry sweep: no stale pools found");
            }
        }
    })
}
