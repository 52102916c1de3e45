//! Domain-to-HTTP error mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use orderdesk_core::DomainError;
use orderdesk_orders::OrderStatus;

/// Map a domain failure onto the HTTP surface. InvalidState reasons are
/// passed through verbatim so callers can see which rule rejected them.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidState(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_state", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_order_status(s: &str) -> Result<OrderStatus, axum::response::Response> {
    s.parse::<OrderStatus>().map_err(|_| {
        json_error(
            StatusCode::BAD_REQUEST,
            "invalid_status",
            "status must be one of: open, closed, canceled",
        )
    })
}
