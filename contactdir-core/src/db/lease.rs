//! Scoped connection leases
//!
//! A [`Lease`] owns one pooled connection for the length of a scope. When it
//! drops, on success, `?` early return or panic unwinding alike, the
//! connection goes back to the pool it came from. It is never closed here.

use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

use sqlx::pool::PoolConnection;
use sqlx::{Connection, PgConnection, PgPool, Postgres, Transaction};
use tracing::debug;

/// A connection borrowed from the shared pool
pub struct Lease {
    conn: PoolConnection<Postgres>,
    acquired_at: Instant,
}

impl Lease {
    /// Borrow a connection, waiting up to the pool's acquire timeout.
    pub async fn acquire(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let conn = pool.acquire().await?;
        debug!(
            idle = pool.num_idle(),
            size = pool.size(),
            "connection leased"
        );
        Ok(Self {
            conn,
            acquired_at: Instant::now(),
        })
    }

    /// Start a transaction on the leased connection.
    ///
    /// Dropping the transaction without committing rolls it back.
    pub async fn begin(&mut self) -> Result<Transaction<'_, Postgres>, sqlx::Error> {
        self.conn.begin().await
    }
}

impl Deref for Lease {
    type Target = PgConnection;

    fn deref(&self) -> &PgConnection {
        &self.conn
    }
}

impl DerefMut for Lease {
    fn deref_mut(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        // PoolConnection's own Drop hands the connection back
        debug!(
            held_ms = held_millis(self.acquired_at.elapsed()),
            "connection returned to pool"
        );
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn held_millis(held: Duration) -> u64 {
    u64::try_from(held.as_millis()).unwrap_or(u64::MAX)
}
