//! Integration tests for the full persistence path.
//!
//! Drives the real services (order manager, catalog, customer directory)
//! against `InMemoryGateway` and verifies:
//! - create/update/close/cancel/delete order flows and their guards
//! - commit atomicity (a failed unit of work leaves nothing behind)
//! - cascade delete of line items
//! - restrict-on-delete for referenced catalog rows
//! - optimistic version conflicts at the gateway boundary

use std::sync::Arc;

use orderdesk_core::{CustomerId, DomainError, ExpectedVersion, OrderId, ProductId, StoreError};
use orderdesk_customers::{CustomerDirectory, NewCustomer};
use orderdesk_orders::{
    DeleteOutcome, LineItemInput, NewOrder, OrderGateway, OrderService, OrderStatus,
    OrderUnitOfWork,
};
use orderdesk_products::{NewCategory, NewProduct, ProductCatalog};

use crate::InMemoryGateway;

struct Fixture {
    gateway: Arc<InMemoryGateway>,
    orders: OrderService,
    catalog: ProductCatalog,
    customers: CustomerDirectory,
}

fn setup() -> Fixture {
    let gateway = Arc::new(InMemoryGateway::new());
    Fixture {
        orders: OrderService::new(gateway.clone()),
        catalog: ProductCatalog::new(gateway.clone()),
        customers: CustomerDirectory::new(gateway.clone()),
        gateway,
    }
}

fn seed_customer(fx: &Fixture) -> CustomerId {
    fx.customers
        .create(NewCustomer {
            name: "Acme Retail".to_string(),
            address: "12 Market Street".to_string(),
            phone: "555-0101".to_string(),
        })
        .unwrap()
        .id
}

fn seed_product(fx: &Fixture, name: &str, price: u64) -> ProductId {
    let category = fx
        .catalog
        .create_category(NewCategory {
            name: "General".to_string(),
        })
        .unwrap();
    fx.catalog
        .create_product(NewProduct {
            name: name.to_string(),
            price,
            category_id: category.id,
        })
        .unwrap()
        .id
}

#[test]
fn create_order_with_lines_computes_totals_from_current_prices() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let p1 = seed_product(&fx, "Espresso Beans", 250);
    let p2 = seed_product(&fx, "Filter Paper", 333);

    let detail = fx
        .orders
        .create(NewOrder {
            customer_id,
            line_items: vec![
                LineItemInput { product_id: p1, quantity: 2 },
                LineItemInput { product_id: p2, quantity: 3 },
            ],
        })
        .unwrap();

    assert_eq!(detail.order.status, OrderStatus::Open);
    assert_eq!(detail.lines.len(), 2);
    let line_p1 = detail.lines.iter().find(|l| l.product_id == p1).unwrap();
    assert_eq!(line_p1.unit_price, 250);
    assert_eq!(line_p1.total, 500);
    assert_eq!(detail.total(), 500 + 999);
}

#[test]
fn create_with_unknown_customer_is_a_validation_failure() {
    let fx = setup();
    let err = fx
        .orders
        .create(NewOrder {
            customer_id: CustomerId::from_i64(999),
            line_items: Vec::new(),
        })
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn failed_create_leaves_nothing_behind() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let p1 = seed_product(&fx, "Espresso Beans", 250);

    // Second line references a product that does not exist, so the whole
    // unit of work must be rejected, including the valid first line and
    // the order row itself.
    let err = fx
        .orders
        .create(NewOrder {
            customer_id,
            line_items: vec![
                LineItemInput { product_id: p1, quantity: 1 },
                LineItemInput { product_id: ProductId::from_i64(999), quantity: 1 },
            ],
        })
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(fx.orders.list().is_empty());
}

#[test]
fn create_rejects_nonpositive_quantities() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let p1 = seed_product(&fx, "Espresso Beans", 250);

    for quantity in [0, -3] {
        let err = fx
            .orders
            .create(NewOrder {
                customer_id,
                line_items: vec![LineItemInput { product_id: p1, quantity }],
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)), "quantity {quantity}");
    }
    assert!(fx.orders.list().is_empty());
}

#[test]
fn create_rejects_duplicate_products() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let p1 = seed_product(&fx, "Espresso Beans", 250);

    let err = fx
        .orders
        .create(NewOrder {
            customer_id,
            line_items: vec![
                LineItemInput { product_id: p1, quantity: 1 },
                LineItemInput { product_id: p1, quantity: 2 },
            ],
        })
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn empty_order_is_created_open() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let detail = fx
        .orders
        .create(NewOrder { customer_id, line_items: Vec::new() })
        .unwrap();
    assert_eq!(detail.order.status, OrderStatus::Open);
    assert!(detail.lines.is_empty());
}

#[test]
fn update_line_items_replaces_the_whole_set() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let p1 = seed_product(&fx, "Espresso Beans", 250);
    let p2 = seed_product(&fx, "Filter Paper", 333);

    let created = fx
        .orders
        .create(NewOrder {
            customer_id,
            line_items: vec![LineItemInput { product_id: p1, quantity: 2 }],
        })
        .unwrap();
    let id = created.order.id;
    let stamped_at = created.order.updated_at;

    fx.orders
        .update_line_items(id, vec![LineItemInput { product_id: p2, quantity: 5 }])
        .unwrap();

    let detail = fx.orders.get(id).unwrap();
    assert_eq!(detail.lines.len(), 1);
    assert_eq!(detail.lines[0].product_id, p2);
    assert_eq!(detail.lines[0].quantity, 5);
    // Line-item updates do not touch the timestamp.
    assert_eq!(detail.order.updated_at, stamped_at);
}

#[test]
fn update_line_items_on_missing_order_is_not_found() {
    let fx = setup();
    let err = fx
        .orders
        .update_line_items(OrderId::from_i64(404), Vec::new())
        .unwrap_err();
    assert_eq!(err, DomainError::NotFound);
}

#[test]
fn terminal_order_rejects_line_item_updates() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let p1 = seed_product(&fx, "Espresso Beans", 250);

    let id = fx
        .orders
        .create(NewOrder {
            customer_id,
            line_items: vec![LineItemInput { product_id: p1, quantity: 1 }],
        })
        .unwrap()
        .order
        .id;
    fx.orders.update_status(id, OrderStatus::Closed).unwrap();

    let err = fx
        .orders
        .update_line_items(id, vec![LineItemInput { product_id: p1, quantity: 4 }])
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::invalid_state("cannot modify a closed or canceled order")
    );
}

#[test]
fn closing_an_empty_order_reports_missing_products() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let id = fx
        .orders
        .create(NewOrder { customer_id, line_items: Vec::new() })
        .unwrap()
        .order
        .id;

    let err = fx.orders.update_status(id, OrderStatus::Closed).unwrap_err();
    assert_eq!(
        err,
        DomainError::invalid_state("cannot close an order without products")
    );
    assert_eq!(fx.orders.get(id).unwrap().order.status, OrderStatus::Open);
}

#[test]
fn closed_order_cannot_be_canceled() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let p1 = seed_product(&fx, "Espresso Beans", 250);
    let id = fx
        .orders
        .create(NewOrder {
            customer_id,
            line_items: vec![LineItemInput { product_id: p1, quantity: 1 }],
        })
        .unwrap()
        .order
        .id;

    fx.orders.update_status(id, OrderStatus::Closed).unwrap();
    assert_eq!(fx.orders.get(id).unwrap().order.status, OrderStatus::Closed);

    let err = fx
        .orders
        .update_status(id, OrderStatus::Canceled)
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::invalid_state("cannot modify a closed or canceled order")
    );
}

#[test]
fn open_order_can_be_canceled_without_lines() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let id = fx
        .orders
        .create(NewOrder { customer_id, line_items: Vec::new() })
        .unwrap()
        .order
        .id;

    fx.orders.update_status(id, OrderStatus::Canceled).unwrap();
    assert_eq!(fx.orders.get(id).unwrap().order.status, OrderStatus::Canceled);
}

#[test]
fn open_to_open_touch_bumps_version_and_restamps() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let created = fx
        .orders
        .create(NewOrder { customer_id, line_items: Vec::new() })
        .unwrap();
    let id = created.order.id;

    fx.orders.update_status(id, OrderStatus::Open).unwrap();

    let after = fx.orders.get(id).unwrap().order;
    assert_eq!(after.status, OrderStatus::Open);
    assert_eq!(after.version, created.order.version + 1);
    assert!(after.updated_at >= created.order.updated_at);
}

#[test]
fn delete_open_order_cascades_to_line_items() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let p1 = seed_product(&fx, "Espresso Beans", 250);
    let id = fx
        .orders
        .create(NewOrder {
            customer_id,
            line_items: vec![LineItemInput { product_id: p1, quantity: 2 }],
        })
        .unwrap()
        .order
        .id;

    assert_eq!(fx.orders.delete(id).unwrap(), DeleteOutcome::Deleted);
    assert!(fx.orders.get(id).is_none());
    assert!(fx.gateway.line_items(id).is_empty());
}

#[test]
fn delete_terminal_order_is_rejected_not_an_error() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let p1 = seed_product(&fx, "Espresso Beans", 250);
    let id = fx
        .orders
        .create(NewOrder {
            customer_id,
            line_items: vec![LineItemInput { product_id: p1, quantity: 1 }],
        })
        .unwrap()
        .order
        .id;
    fx.orders.update_status(id, OrderStatus::Closed).unwrap();

    assert_eq!(fx.orders.delete(id).unwrap(), DeleteOutcome::Rejected);
    // Still there.
    assert!(fx.orders.get(id).is_some());
}

#[test]
fn delete_missing_order_is_not_found() {
    let fx = setup();
    let err = fx.orders.delete(OrderId::from_i64(404)).unwrap_err();
    assert_eq!(err, DomainError::NotFound);
}

#[test]
fn get_on_missing_order_is_absent_and_idempotent() {
    let fx = setup();
    assert!(fx.orders.get(OrderId::from_i64(404)).is_none());
    assert!(fx.orders.get(OrderId::from_i64(404)).is_none());
}

#[test]
fn list_by_status_filters() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let p1 = seed_product(&fx, "Espresso Beans", 250);

    let open = fx
        .orders
        .create(NewOrder { customer_id, line_items: Vec::new() })
        .unwrap()
        .order
        .id;
    let closed = fx
        .orders
        .create(NewOrder {
            customer_id,
            line_items: vec![LineItemInput { product_id: p1, quantity: 1 }],
        })
        .unwrap()
        .order
        .id;
    fx.orders.update_status(closed, OrderStatus::Closed).unwrap();

    let open_ids: Vec<_> = fx
        .orders
        .list_by_status(OrderStatus::Open)
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(open_ids, vec![open]);
    assert!(fx.orders.list_by_status(OrderStatus::Canceled).is_empty());
    assert_eq!(fx.orders.list().len(), 2);
}

#[test]
fn customer_with_orders_cannot_be_removed() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    fx.orders
        .create(NewOrder { customer_id, line_items: Vec::new() })
        .unwrap();

    let err = fx.customers.delete(customer_id).unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
    assert!(fx.customers.get(customer_id).is_some());
}

#[test]
fn category_with_products_cannot_be_removed() {
    let fx = setup();
    let p1 = seed_product(&fx, "Espresso Beans", 250);
    let category_id = fx.catalog.product(p1).unwrap().category_id;

    let err = fx.catalog.delete_category(category_id).unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[test]
fn product_on_an_order_cannot_be_removed() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let p1 = seed_product(&fx, "Espresso Beans", 250);
    fx.orders
        .create(NewOrder {
            customer_id,
            line_items: vec![LineItemInput { product_id: p1, quantity: 1 }],
        })
        .unwrap();

    let err = fx.catalog.delete_product(p1).unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[test]
fn stale_version_commit_is_a_conflict() {
    let fx = setup();
    let customer_id = seed_customer(&fx);
    let order = fx
        .orders
        .create(NewOrder { customer_id, line_items: Vec::new() })
        .unwrap()
        .order;

    // First writer wins.
    let mut winner = order.clone();
    winner.version += 1;
    let mut uow = OrderUnitOfWork::new();
    uow.update_order(winner, ExpectedVersion::Exact(order.version));
    fx.gateway.commit(uow).unwrap();

    // Second writer carries the stale expectation.
    let mut loser = order.clone();
    loser.version += 1;
    let mut uow = OrderUnitOfWork::new();
    uow.update_order(loser, ExpectedVersion::Exact(order.version));
    let err = fx.gateway.commit(uow).unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}
