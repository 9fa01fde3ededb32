use crate::{AppState, get_identity, health, process_and_verify};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.upload.max_bytes;

    Router::new()
        // Verification endpoint
        .route(
            "/process_and_verify",
            post(process_and_verify).layer(DefaultBodyLimit::max(body_limit)),
        )
        // Identity lookup
        .route("/api/v1/identities/{id_type}/{value}", get(get_identity))
        // Health check endpoints
        .route("/healthz", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Add shared state
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
