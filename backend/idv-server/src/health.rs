use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::warn;
use serde_json::json;

/// GET /healthz - fixed payload, touches nothing
pub async fn health_check() -> Response {
    (StatusCode::OK, Json(json!({ "status": "healthy" }))).into_response()
}

/// GET /live - process liveness probe
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - readiness probe (database reachable, OCR configured)
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    let database = match state.pipeline.repository().ping().await {
        Ok(()) => "operational",
        Err(e) => {
            warn!("Readiness check: database unavailable: {e}");
            "unavailable"
        }
    };
    let ocr = if state.pipeline.is_ocr_available() {
        "configured"
    } else {
        "not_configured"
    };

    let status = if database == "operational" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = json!({
        "status": if status == StatusCode::OK { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "database": database,
            "ocr": ocr,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status, Json(body)).into_response()
}
