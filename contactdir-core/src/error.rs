//! Structured error types for contactdir-core.
//!
//! The binary wraps these in `anyhow`; the HTTP layer maps them to
//! generic responses and logs the detail.

use std::io;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// SQLSTATE classes reported by a server that is unreachable, overloaded
/// or going away: connection exception, insufficient resources, operator
/// intervention, system error.
const OPERATIONAL_SQLSTATE_CLASSES: &[&str] = &["08", "53", "57", "58"];

#[derive(Error, Debug)]
pub enum Error {
    /// Resolver was handed an empty candidate list
    #[error("no database host candidates configured")]
    NoHostCandidates,

    /// Every candidate failed; carries the last one tried
    #[error("all {attempts} database host candidates failed, last was '{host}': {source}")]
    HostsExhausted {
        attempts: usize,
        host: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("contacts request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("contacts API returned status {status}")]
    UpstreamStatus { status: u16 },

    #[error("seed file error: {0}")]
    Seed(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration error: {key}: {reason}")]
    Config { key: String, reason: String },
}

impl Error {
    pub(crate) fn config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// True when the database itself is unavailable, either on the client
    /// side (socket, TLS, pool) or as reported by the server, rather than a
    /// statement being rejected.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::NoHostCandidates | Self::HostsExhausted { .. } => true,
            Self::Database(sqlx::Error::Database(db)) => db.code().is_some_and(|code| {
                OPERATIONAL_SQLSTATE_CLASSES
                    .iter()
                    .any(|class| code.starts_with(*class))
            }),
            Self::Database(e) => matches!(
                e,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            ),
            _ => false,
        }
    }
}
