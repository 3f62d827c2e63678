//! contactdir CLI - searchable contact directory mirrored from Nimble CRM
//!
//! Subcommands:
//! - `serve`: connect, sync once, then serve `GET /search`
//! - `sync`: one full replace from the CRM (for cron)
//! - `seed`: load a CSV seed file
//! - `search`: run a full-text search and print JSON

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "contactdir",
    author,
    version,
    about = "Searchable contact directory backed by Postgres full-text search",
    long_about = "Mirror Nimble CRM contacts into Postgres and search them by name or email. \
                  Configuration comes from DB_* and NIMBLE_API_* environment variables or a .env file."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP search API
    Serve(commands::serve::ServeArgs),
    /// Replace the contacts table from the Nimble API once
    Sync(commands::sync::SyncArgs),
    /// Load contacts from a CSV seed file
    Seed(commands::seed::SeedArgs),
    /// Full-text search the contacts table and print JSON
    Search(commands::search::SearchArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Sync(args) => commands::run_sync(args).await?,
        Commands::Seed(args) => commands::run_seed(args).await?,
        Commands::Search(args) => commands::run_search(args).await?,
    }
    Ok(())
}
