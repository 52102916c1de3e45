use axum::{http::StatusCode, response::IntoResponse, Json};

/// Liveness probe.
pub async fn healthz() -> axum::response::Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}
