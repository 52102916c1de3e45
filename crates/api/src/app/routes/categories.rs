use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use orderdesk_core::CategoryId;
use orderdesk_products::{Category, NewCategory};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .catalog
        .categories()
        .into_iter()
        .map(dto::category_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid category id")
        }
    };
    match services.catalog.category(id) {
        Some(category) => (StatusCode::OK, Json(dto::category_to_json(category))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "category not found"),
    }
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCategoryRequest>,
) -> axum::response::Response {
    match services.catalog.create_category(NewCategory { name: body.name }) {
        Ok(category) => {
            let location = format!("/categories/{}", category.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(dto::category_to_json(category)),
            )
                .into_response()
        }
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn update_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateCategoryRequest>,
) -> axum::response::Response {
    let id: CategoryId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid category id")
        }
    };
    if body.id != id {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "id_mismatch",
            "path id does not match body id",
        );
    }
    match services
        .catalog
        .update_category(Category { id, name: body.name })
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid category id")
        }
    };
    match services.catalog.delete_category(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}
