use axum::Router;
use axum::routing::{get, post};
use tower_http::limit::RequestBodyLimitLayer;

use super::handlers::{ask_handler, health_handler, index_handler, ingest_handler};
use super::server::AppState;

const MAX_BODY_SIZE: usize = 65_536;

pub(crate) fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/ingest", post(ingest_handler))
        .route("/api/ask", post(ask_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .with_state(state)
}
