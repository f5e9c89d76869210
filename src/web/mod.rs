// Web server — Axum-based classification API.
//
// Two routes: POST /predict scores a text, GET /health reports liveness and
// whether the neural model is loaded. CORS is permissive because the API is
// consumed directly from browser frontends.

use std::sync::Arc;

use anyhow::Result;
use axum::http::header;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::scorer::{ScorerMode, ToxicityScorer};
use crate::sentiment::SentimentAnalyzer;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
///
/// Everything here is selected once at startup and immutable afterwards —
/// requests share it without synchronization.
#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<dyn ToxicityScorer>,
    pub sentiment: Arc<SentimentAnalyzer>,
    pub mode: ScorerMode,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(state: AppState, bind: &str, port: u16) -> Result<()> {
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("sift classification API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router. Public so integration tests can drive it with
/// tower::ServiceExt::oneshot without binding a socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
