//! Console logging for the contactdir binary
//!
//! Without `RUST_LOG`, our own crates log at info (debug with `--debug`)
//! and everything else, sqlx included, only at warn. `RUST_LOG` replaces
//! that default entirely:
//!
//!   RUST_LOG=contactdir_core::sync=debug,sqlx=info contactdir serve

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const OWN_TARGETS: &[&str] = &["contactdir", "contactdir_core", "contactdir_server", "tower_http"];

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub debug: bool,
}

fn default_directives(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    let mut directives = vec!["warn".to_string()];
    directives.extend(OWN_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.join(",")
}

/// Install the global subscriber. Fails if one is already set.
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(config.debug)))
        .map_err(|err| anyhow!(err))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
