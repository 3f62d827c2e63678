//! Shared startup: configuration and a resolved, bootstrapped pool

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use contactdir_core::config::load_dotenv;
use contactdir_core::db::{connect_with_retry, schema, PgConnector, RetryPolicy};
use contactdir_core::{AppConfig, DatabaseConfig};
use sqlx::PgPool;
use tracing::info;

/// Database connection options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct ConnectArgs {
    /// Connection attempts before giving up
    #[arg(long, default_value = "10")]
    pub connect_attempts: u32,

    /// Seconds between connection attempts
    #[arg(long, default_value = "3")]
    pub connect_delay: u64,

    /// Seconds to wait before the first attempt (e.g. while the database container boots)
    #[arg(long, default_value = "0", env = "CONTACTDIR_STARTUP_DELAY")]
    pub startup_delay: u64,
}

impl ConnectArgs {
    fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.connect_attempts,
            delay: Duration::from_secs(self.connect_delay),
        }
    }
}

/// Full configuration, for commands that talk to the CRM.
pub fn app_config() -> Result<AppConfig> {
    load_dotenv();
    AppConfig::from_env().context("Invalid configuration")
}

/// Database-only configuration, for commands that never call the CRM.
pub fn database_config() -> Result<DatabaseConfig> {
    load_dotenv();
    DatabaseConfig::from_lookup(|key| std::env::var(key).ok()).context("Invalid configuration")
}

/// Resolve a pool across the configured hosts and make sure the table exists.
pub async fn connect(config: &DatabaseConfig, args: &ConnectArgs) -> Result<PgPool> {
    if args.startup_delay > 0 {
        info!("Waiting {}s before connecting to the database", args.startup_delay);
        tokio::time::sleep(Duration::from_secs(args.startup_delay)).await;
    }

    let candidates = config.candidates();
    let connector = PgConnector::new(config);
    let pool = connect_with_retry(&candidates, &connector, args.policy())
        .await
        .context("Failed to connect to the database after multiple attempts")?;

    schema::ensure_contacts_table(&pool)
        .await
        .context("Failed to prepare the contacts table")?;
    Ok(pool)
}
