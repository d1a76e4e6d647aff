//! HTTP front end: the page, the layout description and the callback API.

pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

use crate::dashboard::Dashboard;

/// Build the router with all routes.
pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/layout", get(handlers::layout))
        .route("/api/callback", post(handlers::callback))
        .route("/health", get(handlers::health))
        .with_state(dashboard)
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(dashboard: Arc<Dashboard>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    log::info!("Dashboard available at http://{}/", listener.local_addr()?);

    axum::serve(listener, router(dashboard))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Received Ctrl+C, shutting down"),
        Err(e) => log::error!("Cannot listen for Ctrl+C: {e}"),
    }
}
