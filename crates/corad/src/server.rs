//! HTTP server for corad

use crate::routes;
use crate::session::SharedSessions;
use anyhow::Result;
use axum::Router;
use cora_common::CustomerDirectory;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub sessions: SharedSessions,
    pub directory: Arc<CustomerDirectory>,
    pub max_nric_attempts: u32,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        sessions: SharedSessions,
        directory: CustomerDirectory,
        max_nric_attempts: u32,
    ) -> Self {
        Self {
            sessions,
            directory: Arc::new(directory),
            max_nric_attempts,
            start_time: Instant::now(),
        }
    }
}

/// Build the full application router
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::session_routes())
        .merge(routes::auth_routes())
        .merge(routes::account_routes())
        .merge(routes::catalog_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until ctrl-c
pub async fn run(state: AppState, addr: &str) -> Result<()> {
    let app = app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutting down gracefully");
}
