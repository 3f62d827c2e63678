//! Load a CSV seed file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use contactdir_core::seed_from_file;

use super::connect::{connect, database_config, ConnectArgs};

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// CSV with a header row and first name, last name, email columns
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    #[command(flatten)]
    pub connect: ConnectArgs,
}

pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let config = database_config()?;
    let pool = connect(&config, &args.connect).await?;

    let rows = seed_from_file(&pool, &args.path)
        .await
        .with_context(|| format!("Failed to seed from {}", args.path.display()))?;
    println!("{}", rows);
    Ok(())
}
