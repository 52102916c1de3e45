use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use orderdesk_core::CustomerId;
use orderdesk_customers::{Customer, NewCustomer};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .customers
        .list()
        .into_iter()
        .map(dto::customer_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid customer id")
        }
    };
    match services.customers.get(id) {
        Some(customer) => (StatusCode::OK, Json(dto::customer_to_json(customer))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found"),
    }
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCustomerRequest>,
) -> axum::response::Response {
    let new = NewCustomer {
        name: body.name,
        address: body.address,
        phone: body.phone,
    };
    match services.customers.create(new) {
        Ok(customer) => {
            let location = format!("/customers/{}", customer.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(dto::customer_to_json(customer)),
            )
                .into_response()
        }
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateCustomerRequest>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid customer id")
        }
    };
    if body.id != id {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "id_mismatch",
            "path id does not match body id",
        );
    }
    let customer = Customer {
        id,
        name: body.name,
        address: body.address,
        phone: body.phone,
    };
    match services.customers.update(customer) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid customer id")
        }
    };
    match services.customers.delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}
