//! Startup grace window for the database
//!
//! The database container may still be starting when the service boots, so
//! resolution is retried a fixed number of times with a fixed delay.

use std::time::Duration;

use tracing::{error, warn};

use super::resolver::{resolve, Connector, HostCandidate};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 10,
            delay: Duration::from_secs(3),
        }
    }
}

/// Resolve a pool, retrying the whole candidate walk on failure.
///
/// Returns the error from the final attempt once the policy is used up.
pub async fn connect_with_retry<C>(
    candidates: &[HostCandidate],
    connector: &C,
    policy: RetryPolicy,
) -> Result<C::Pool>
where
    C: Connector + ?Sized,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;

    loop {
        match resolve(candidates, connector).await {
            Ok(pool) => return Ok(pool),
            Err(Error::NoHostCandidates) => return Err(Error::NoHostCandidates),
            Err(e) if attempt < attempts => {
                warn!(
                    "Failed to connect to the database (attempt {}/{}): {}",
                    attempt, attempts, e
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => {
                error!(
                    "Failed to connect to the database after {} attempts: {}",
                    attempts, e
                );
                return Err(e);
            }
        }
    }
}
