//! HTTP server command
//!
//! Startup order: connect (with retries), optional seed, one sync, then
//! serve. A periodic sync can run alongside the server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use contactdir_core::nimble::NimbleClient;
use contactdir_core::SyncPipeline;
use contactdir_server::{run_server, spawn_sync_loop, ServerConfig};
use tracing::info;

use super::connect::{app_config, connect, ConnectArgs};

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "0.0.0.0:8000", env = "CONTACTDIR_BIND")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins)
    #[arg(long)]
    pub cors_permissive: bool,

    /// Load this CSV seed file before the first sync
    #[arg(long, value_name = "PATH")]
    pub seed: Option<PathBuf>,

    /// Skip the sync that normally runs before serving
    #[arg(long)]
    pub skip_initial_sync: bool,

    /// Re-sync from the CRM every N seconds while serving
    #[arg(long, value_name = "SECS")]
    pub sync_every: Option<u64>,

    #[command(flatten)]
    pub connect: ConnectArgs,
}

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = app_config()?;
    let pool = connect(&config.database, &args.connect).await?;

    let client = NimbleClient::new(config.nimble).context("Failed to build Nimble client")?;
    let pipeline = SyncPipeline::new(pool.clone(), client);

    if let Some(path) = &args.seed {
        pipeline
            .seed(path)
            .await
            .with_context(|| format!("Failed to seed from {}", path.display()))?;
    }

    if !args.skip_initial_sync {
        let outcome = pipeline.run().await;
        info!(?outcome, "Initial sync finished");
    }

    // the loop owns the pipeline, so syncs never overlap
    let sync_task = match args.sync_every {
        Some(secs) if secs > 0 => Some(spawn_sync_loop(pipeline, Duration::from_secs(secs))),
        _ => None,
    };

    let server_config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };
    let result = run_server(pool, server_config).await.context("Server error");

    if let Some(task) = sync_task {
        task.abort();
    }
    result
}
