//! One-shot sync, suitable for a cron job

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use contactdir_core::nimble::NimbleClient;
use contactdir_core::{SyncOutcome, SyncPipeline};
use tracing::info;

use super::connect::{app_config, connect, ConnectArgs};

#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// Load this CSV seed file before syncing
    #[arg(long, value_name = "PATH")]
    pub seed: Option<PathBuf>,

    #[command(flatten)]
    pub connect: ConnectArgs,
}

/// Run the pipeline once.
///
/// Fetch and replace failures are logged by the pipeline and leave the
/// table as it was; only configuration or connectivity problems fail the
/// command.
pub async fn run_sync(args: SyncArgs) -> Result<()> {
    info!("Starting a scheduled update of the contacts table");
    let config = app_config()?;
    let pool = connect(&config.database, &args.connect).await?;
    let client = NimbleClient::new(config.nimble).context("Failed to build Nimble client")?;
    let pipeline = SyncPipeline::new(pool, client);

    if let Some(path) = &args.seed {
        pipeline
            .seed(path)
            .await
            .with_context(|| format!("Failed to seed from {}", path.display()))?;
    }

    match pipeline.run().await {
        SyncOutcome::Replaced { rows } => info!("Sync complete: {} contacts", rows),
        SyncOutcome::Unchanged => info!("Sync skipped: no data fetched, existing contacts kept"),
        SyncOutcome::Failed => info!("Sync rolled back, existing contacts kept"),
    }
    Ok(())
}
