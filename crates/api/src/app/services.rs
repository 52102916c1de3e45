//! Service facade handed to the routes.

use std::sync::Arc;

use orderdesk_customers::CustomerDirectory;
use orderdesk_infra::InMemoryGateway;
use orderdesk_orders::OrderService;
use orderdesk_products::ProductCatalog;

/// One shared gateway behind three domain services.
pub struct AppServices {
    pub orders: OrderService,
    pub catalog: ProductCatalog,
    pub customers: CustomerDirectory,
}

impl AppServices {
    pub fn new() -> Self {
        let gateway = Arc::new(InMemoryGateway::new());
        Self {
            orders: OrderService::new(gateway.clone()),
            catalog: ProductCatalog::new(gateway.clone()),
            customers: CustomerDirectory::new(gateway),
        }
    }
}

impl Default for AppServices {
    fn default() -> Self {
        Self::new()
    }
}
