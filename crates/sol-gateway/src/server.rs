//! HTTP server implementation using Axum.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use sol_core::RAGEngine;

/// Largest accepted request body (all files of one upload together)
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn RAGEngine>,
}

impl AppState {
    pub fn new(engine: Arc<dyn RAGEngine>) -> Self {
        Self { engine }
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(super::routes::upload_documents))
        .route("/ask", get(super::routes::ask_question))
        .route("/health", get(super::routes::health_check))
        .route("/metrics", get(super::routes::metrics))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind `host:port`; `host` may be a hostname or an IPv4/IPv6 literal.
pub async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    TcpListener::bind((host, port)).await
}

/// Bind and serve until the process is stopped.
pub async fn start(host: &str, port: u16, state: AppState) -> std::io::Result<()> {
    let listener = bind(host, port).await?;
    info!("Solyntra listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state)).await
}
