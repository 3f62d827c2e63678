//! contactdir-server: HTTP surface for the contact directory
//!
//! `GET /search` runs a full-text search, `GET /health` reports liveness.
//! A background task can keep the table in sync with the CRM.

pub mod background;
pub mod http;

pub use background::spawn_sync_loop;
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
