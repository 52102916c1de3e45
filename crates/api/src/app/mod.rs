//! Application wiring: services, middleware, router.

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;
use services::AppServices;

/// Build the full application router with its services.
///
/// Every piece of state is request-scoped through `Extension`; there are no
/// globals. The same router serves production and the black-box tests.
pub fn build_app() -> Router {
    let services = Arc::new(AppServices::new());

    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::request_context))
            .layer(Extension(services)),
    )
}
