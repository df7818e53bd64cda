//! Dashboard — Axum web server exposing the betting session as JSON.
//!
//! The presentation layer (the match card, the bet slip, the toasts) talks
//! to these endpoints. CORS is open for local development.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::future::Future;
use tower_http::cors::CorsLayer;
use tracing::info;

use routes::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("*"))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/matches", get(routes::get_matches))
        .route("/api/matches/:id/select", post(routes::select_outcome))
        .route("/api/matches/:id/stake", put(routes::set_stake))
        .route("/api/matches/:id/bets", post(routes::place_bet))
        .route("/api/ledger", get(routes::get_ledger))
        .route("/api/notifications", get(routes::get_notifications))
        .route("/health", get(routes::health))
        .layer(cors)
        .with_state(state)
}

/// Serve the dashboard until `shutdown` resolves.
pub async fn serve(
    state: AppState,
    port: u16,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let app = build_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind dashboard port {port}"))?;
    info!(port, "Dashboard server listening on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Dashboard server error")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
