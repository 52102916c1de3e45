//! The order aggregate manager.

use std::sync::Arc;

use chrono::Utc;

use orderdesk_core::{DomainError, DomainResult, ExpectedVersion, OrderId, StoreError};

use crate::gateway::{OrderGateway, OrderUnitOfWork};
use crate::order::{
    LineDetail, LineItem, LineItemInput, NewOrder, Order, OrderDetail, OrderStatus,
};

/// Outcome of a delete attempt that found the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The order is closed or canceled; deletion is only permitted while
    /// Open. This is an outcome, not an error.
    Rejected,
}

/// How often a commit conflict triggers a fresh read before giving up.
const CONFLICT_RETRIES: usize = 1;

/// Order lifecycle manager.
///
/// Loads the aggregate fresh from the gateway on every operation. A commit
/// conflict means the row changed underfoot; the operation re-reads once and
/// re-runs its guards, so a stale precondition resolves to its real outcome
/// (NotFound or InvalidState) instead of leaking a raw storage error.
pub struct OrderService {
    gateway: Arc<dyn OrderGateway>,
}

impl OrderService {
    pub fn new(gateway: Arc<dyn OrderGateway>) -> Self {
        Self { gateway }
    }

    /// Load one order with priced lines. Read-only; unknown ids are absent,
    /// never an error.
    pub fn get(&self, id: OrderId) -> Option<OrderDetail> {
        let order = self.gateway.order(id)?;
        Some(self.detail(order))
    }

    pub fn list(&self) -> Vec<Order> {
        self.gateway.orders()
    }

    pub fn list_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.gateway.orders_by_status(status)
    }

    /// Create an order (status Open) together with its initial line items in
    /// a single commit; partial application is never observable. Referential
    /// existence, positive quantities, and product uniqueness are enforced
    /// by the gateway at commit time.
    pub fn create(&self, new: NewOrder) -> DomainResult<OrderDetail> {
        let id = self.gateway.next_order_id();
        let order = Order {
            id,
            customer_id: new.customer_id,
            updated_at: Utc::now(),
            status: OrderStatus::Open,
            version: 1,
        };

        let mut uow = OrderUnitOfWork::new();
        uow.insert_order(order.clone());
        for item in &new.line_items {
            uow.insert_line_item(LineItem {
                order_id: id,
                product_id: item.product_id,
                quantity: item.quantity,
            });
        }

        self.gateway.commit(uow).map_err(store_to_domain)?;
        Ok(self.detail(order))
    }

    /// Replace the whole line-item set of an Open order. Status, customer
    /// reference, and timestamp are untouched.
    pub fn update_line_items(
        &self,
        id: OrderId,
        line_items: Vec<LineItemInput>,
    ) -> DomainResult<()> {
        let mut attempts = 0;
        loop {
            let Some(order) = self.gateway.order(id) else {
                return Err(DomainError::NotFound);
            };
            order.ensure_mutable()?;

            let mut touched = order.clone();
            touched.version += 1;

            let mut uow = OrderUnitOfWork::new();
            uow.update_order(touched, ExpectedVersion::Exact(order.version));
            uow.clear_line_items(id);
            for item in &line_items {
                uow.insert_line_item(LineItem {
                    order_id: id,
                    product_id: item.product_id,
                    quantity: item.quantity,
                });
            }

            match self.gateway.commit(uow) {
                Ok(()) => return Ok(()),
                Err(StoreError::Conflict(_)) if attempts < CONFLICT_RETRIES => attempts += 1,
                Err(err) => return Err(store_to_domain(err)),
            }
        }
    }

    /// Drive the status state machine.
    ///
    /// Guard precedence (see [`Order::guard_transition`]): the empty-close
    /// check runs before the terminal check. A legal transition re-stamps
    /// the order timestamp, including the permitted Open→Open touch.
    pub fn update_status(&self, id: OrderId, new_status: OrderStatus) -> DomainResult<()> {
        let mut attempts = 0;
        loop {
            let Some(order) = self.gateway.order(id) else {
                return Err(DomainError::NotFound);
            };
            let line_count = self.gateway.line_items(id).len();
            order.guard_transition(new_status, line_count)?;

            let mut updated = order.clone();
            updated.status = new_status;
            updated.updated_at = Utc::now();
            updated.version += 1;

            let mut uow = OrderUnitOfWork::new();
            uow.update_order(updated, ExpectedVersion::Exact(order.version));

            match self.gateway.commit(uow) {
                Ok(()) => return Ok(()),
                Err(StoreError::Conflict(_)) if attempts < CONFLICT_RETRIES => attempts += 1,
                Err(err) => return Err(store_to_domain(err)),
            }
        }
    }

    /// Delete an Open order; its line items go with it by cascade.
    pub fn delete(&self, id: OrderId) -> DomainResult<DeleteOutcome> {
        let mut attempts = 0;
        loop {
            let Some(order) = self.gateway.order(id) else {
                return Err(DomainError::NotFound);
            };
            if order.status.is_terminal() {
                return Ok(DeleteOutcome::Rejected);
            }

            let mut uow = OrderUnitOfWork::new();
            uow.remove_order(id, ExpectedVersion::Exact(order.version));

            match self.gateway.commit(uow) {
                Ok(()) => return Ok(DeleteOutcome::Deleted),
                Err(StoreError::Conflict(_)) if attempts < CONFLICT_RETRIES => attempts += 1,
                Err(err) => return Err(store_to_domain(err)),
            }
        }
    }

    fn detail(&self, order: Order) -> OrderDetail {
        let lines = self
            .gateway
            .line_items(order.id)
            .into_iter()
            .map(|item| {
                // Product removal is restricted while referenced, so the
                // lookup holds; a dangling reference would be a store bug.
                let (product_name, unit_price) = match self.gateway.product(item.product_id) {
                    Some(product) => (product.name, product.price),
                    None => (String::new(), 0),
                };
                LineDetail {
                    product_id: item.product_id,
                    product_name,
                    quantity: item.quantity,
                    unit_price,
                    total: unit_price.saturating_mul(item.quantity.max(0) as u64),
                }
            })
            .collect();
        OrderDetail { order, lines }
    }
}

/// Translate a commit failure into the caller-facing taxonomy: missing rows
/// are NotFound, relational rejections are input problems, and a conflict
/// that survived the retry stays a conflict.
fn store_to_domain(err: StoreError) -> DomainError {
    match err {
        StoreError::NotFound { .. } => DomainError::NotFound,
        StoreError::ForeignKey(msg)
        | StoreError::Duplicate(msg)
        | StoreError::Check(msg) => DomainError::validation(msg),
        StoreError::Conflict(msg) => DomainError::conflict(msg),
    }
}
