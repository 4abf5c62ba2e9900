use axum::{http::StatusCode, response::Json};
use serde_json::json;

/// GET /health
/// Liveness probe; touches no storage.
pub async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
