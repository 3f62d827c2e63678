//! Liveness endpoint with pool occupancy

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub pool: PoolStats,
}

/// Open and idle connections; `open - idle` are currently leased
#[derive(Serialize)]
pub struct PoolStats {
    pub open: u32,
    pub idle: usize,
}

/// GET /health
///
/// Does not touch the database, so it answers even while the pool is
/// saturated.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        pool: PoolStats {
            open: state.pool.size(),
            idle: state.pool.num_idle(),
        },
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
