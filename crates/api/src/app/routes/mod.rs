use axum::{routing::get, Router};

pub mod categories;
pub mod customers;
pub mod orders;
pub mod products;
pub mod system;

/// Router for all endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/healthz", get(system::healthz))
        .nest("/categories", categories::router())
        .nest("/customers", customers::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
}
