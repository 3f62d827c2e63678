//! Database layer - pool resolution, leases and schema
//!
//! # Design Principles
//!
//! - One pool per process, resolved once across candidate hosts
//! - Every borrowed connection goes through a [`Lease`]
//! - Startup is the only place that retries with a delay

pub mod lease;
pub mod resolver;
pub mod retry;
pub mod schema;

pub use lease::Lease;
pub use resolver::{resolve, Connector, HostCandidate, HostKind, PgConnector, PoolBounds};
pub use retry::{connect_with_retry, RetryPolicy};
