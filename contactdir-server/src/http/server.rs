//! Router assembly and the serve loop
//!
//! The router is built separately from binding so tests can drive it with
//! `oneshot` against a pool that never connects.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use super::routes;

/// Listener and middleware settings for the search API
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Send `Access-Control-Allow-Origin: *`; off means no CORS headers at all
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors_permissive: false,
        }
    }
}

/// State handed to every handler; the pool is the only shared resource.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

/// `/health` and `/search` behind request tracing.
pub fn build_router(pool: PgPool, config: &ServerConfig) -> Router {
    let api = Router::new()
        .merge(routes::health::router())
        .merge(routes::search::router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { pool }));

    if !config.cors_permissive {
        return api;
    }
    warn!("Permissive CORS enabled, any origin may call the search API");
    api.layer(CorsLayer::permissive())
}

/// Bind and serve until Ctrl+C or SIGTERM; in-flight searches finish first.
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind_addr;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!("Contact search API listening on http://{}", addr);

    axum::serve(listener, build_router(pool, &config))
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .map_err(ServerError::Serve)?;

    info!("Contact search API stopped");
    Ok(())
}

/// Resolves on the first shutdown signal.
///
/// A signal that cannot be installed is logged and never fires, so the
/// other one still works.
async fn wait_for_shutdown() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Cannot listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = interrupt => "Ctrl+C",
        _ = terminate => "SIGTERM",
    };
    info!("{} received, draining connections", signal);
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}
