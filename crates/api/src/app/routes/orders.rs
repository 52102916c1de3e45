use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use orderdesk_core::OrderId;
use orderdesk_orders::{DeleteOutcome, LineItemInput, NewOrder};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route(
            "/:id",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/:id/status", put(update_order_status))
        .route("/status/:status", get(list_orders_by_status))
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .orders
        .list()
        .into_iter()
        .map(dto::order_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    };
    match services.orders.get(id) {
        Some(detail) => {
            (StatusCode::OK, Json(dto::order_detail_to_json(detail))).into_response()
        }
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
    }
}

pub async fn list_orders_by_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(status): Path<String>,
) -> axum::response::Response {
    let status = match errors::parse_order_status(&status) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let items = services
        .orders
        .list_by_status(status)
        .into_iter()
        .map(dto::order_to_json)
        .collect::<Vec<_>>();
    if items.is_empty() {
        return errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no orders with that status",
        );
    }
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let new = NewOrder {
        customer_id: body.customer_id,
        line_items: body
            .line_items
            .into_iter()
            .map(|l| LineItemInput {
                product_id: l.product_id,
                quantity: l.quantity,
            })
            .collect(),
    };

    match services.orders.create(new) {
        Ok(detail) => {
            tracing::info!(order_id = %detail.order.id, "order created");
            let location = format!("/orders/{}", detail.order.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(dto::order_detail_to_json(detail)),
            )
                .into_response()
        }
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn update_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateOrderRequest>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    };
    let line_items = body
        .line_items
        .into_iter()
        .map(|l| LineItemInput {
            product_id: l.product_id,
            quantity: l.quantity,
        })
        .collect();

    match services.orders.update_line_items(id, line_items) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn update_order_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateOrderStatusRequest>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    };
    let status = match errors::parse_order_status(&body.status) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match services.orders.update_status(id, status) {
        Ok(()) => {
            tracing::info!(order_id = %id, status = %status, "order status updated");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn delete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    };
    match services.orders.delete(id) {
        Ok(DeleteOutcome::Deleted) => {
            tracing::info!(order_id = %id, "order deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        // Terminal orders cannot be deleted; the contract folds that into 404.
        Ok(DeleteOutcome::Rejected) => {
            errors::json_error(StatusCode::NOT_FOUND, "not_found", "order cannot be deleted")
        }
        Err(err) => errors::domain_error_to_response(err),
    }
}
