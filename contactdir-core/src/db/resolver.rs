//! Connection pool resolution across host identities
//!
//! The same database may be reachable as a bare address, a container
//! alias or a service-discovery name depending on where the process runs.
//! [`resolve`] walks the candidates in order and keeps the first pool
//! that connects.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::error::{Error, Result};

/// Which mechanism a host identifier relies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Direct,
    ContainerAlias,
    ServiceName,
}

impl HostKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Direct => "host",
            Self::ContainerAlias => "container name",
            Self::ServiceName => "service name",
        }
    }
}

/// One way of addressing the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCandidate {
    pub kind: HostKind,
    pub host: String,
}

impl HostCandidate {
    pub fn direct(host: impl Into<String>) -> Self {
        Self {
            kind: HostKind::Direct,
            host: host.into(),
        }
    }

    pub fn container_alias(host: impl Into<String>) -> Self {
        Self {
            kind: HostKind::ContainerAlias,
            host: host.into(),
        }
    }

    pub fn service_name(host: impl Into<String>) -> Self {
        Self {
            kind: HostKind::ServiceName,
            host: host.into(),
        }
    }
}

/// Pool sizing shared by every candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolBounds {
    pub min_connections: u32,
    pub max_connections: u32,
    /// How long a caller waits for a free connection before failing
    pub acquire_timeout: Duration,
}

impl Default for PoolBounds {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Builds a pool bound to a single host identifier.
#[async_trait]
pub trait Connector: Send + Sync {
    type Pool: Send;

    async fn connect(&self, candidate: &HostCandidate) -> Result<Self::Pool, sqlx::Error>;
}

/// Postgres connector sharing port, credentials and bounds across hosts
#[derive(Clone)]
pub struct PgConnector {
    port: u16,
    database: String,
    user: String,
    password: String,
    bounds: PoolBounds,
}

impl PgConnector {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            port: config.port,
            database: config.name.clone(),
            user: config.user.clone(),
            password: config.password.clone(),
            bounds: config.pool,
        }
    }

    pub fn connect_options(&self, host: &str) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }

    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.bounds.min_connections)
            .max_connections(self.bounds.max_connections)
            .acquire_timeout(self.bounds.acquire_timeout)
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Pool = PgPool;

    async fn connect(&self, candidate: &HostCandidate) -> Result<PgPool, sqlx::Error> {
        // connect_with opens a first connection, so a dead host fails here
        self.pool_options()
            .connect_with(self.connect_options(&candidate.host))
            .await
    }
}

/// Return a pool for the first candidate that connects.
///
/// Candidates after the first success are never tried. When all fail the
/// error carries the last candidate and its underlying cause.
pub async fn resolve<C>(candidates: &[HostCandidate], connector: &C) -> Result<C::Pool>
where
    C: Connector + ?Sized,
{
    let mut last_failure = None;

    for candidate in candidates {
        match connector.connect(candidate).await {
            Ok(pool) => {
                info!(
                    host = %candidate.host,
                    "Successfully created connection pool using {}",
                    candidate.kind.label()
                );
                return Ok(pool);
            }
            Err(e) => {
                warn!(
                    host = %candidate.host,
                    error = %e,
                    "Failed to create connection pool using {}",
                    candidate.kind.label()
                );
                last_failure = Some((candidate.host.clone(), e));
            }
        }
    }

    match last_failure {
        Some((host, source)) => Err(Error::HostsExhausted {
            attempts: candidates.len(),
            host,
            source,
        }),
        None => Err(Error::NoHostCandidates),
    }
}
