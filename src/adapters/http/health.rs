//! Liveness endpoints.

use axum::{routing::get, Router};

/// GET /health
pub async fn health() -> &'static str {
    "Healthy"
}

/// GET /api/v1/
pub async fn api_v1_ready() -> &'static str {
    "Api v1 is ready!"
}

pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/", get(api_v1_ready))
}
