//! Periodic CRM sync while the server runs
//!
//! All runs happen sequentially in one task, so a slow sync delays the next
//! tick instead of overlapping it.

use std::time::Duration;

use contactdir_core::nimble::ContactSource;
use contactdir_core::{SyncOutcome, SyncPipeline};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Re-run the pipeline every `every`, starting one period from now.
pub fn spawn_sync_loop<S>(pipeline: SyncPipeline<S>, every: Duration) -> JoinHandle<()>
where
    S: ContactSource + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("Scheduled contact sync every {}s", every.as_secs());

        loop {
            ticker.tick().await;
            match pipeline.run().await {
                SyncOutcome::Replaced { rows } => info!(rows, "Scheduled sync replaced contacts"),
                SyncOutcome::Unchanged => warn!("Scheduled sync skipped, no data fetched"),
                SyncOutcome::Failed => warn!("Scheduled sync rolled back"),
            }
        }
    })
}
