//! Persistence port for the order aggregate.
//!
//! Reads, store-side id allocation, and the atomic unit of work every
//! mutation goes through. The implementation lives in the infrastructure
//! layer; this crate only states the contract.

use orderdesk_core::{ExpectedVersion, OrderId, ProductId, StoreResult};
use orderdesk_products::Product;

use crate::order::{LineItem, Order, OrderStatus};

/// A single pending row mutation inside a unit of work.
#[derive(Debug, Clone)]
pub enum OrderMutation {
    InsertOrder(Order),
    /// Replace the order row; the commit fails unless the stored version
    /// matches `expected`.
    UpdateOrder {
        order: Order,
        expected: ExpectedVersion,
    },
    /// Remove the order row and, by cascade, its line items.
    RemoveOrder {
        id: OrderId,
        expected: ExpectedVersion,
    },
    /// Remove every line item of an order.
    ClearLineItems(OrderId),
    InsertLineItem(LineItem),
}

/// Pending mutations committed together or not at all.
#[derive(Debug, Clone, Default)]
pub struct OrderUnitOfWork {
    mutations: Vec<OrderMutation>,
}

impl OrderUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_order(&mut self, order: Order) {
        self.mutations.push(OrderMutation::InsertOrder(order));
    }

    pub fn update_order(&mut self, order: Order, expected: ExpectedVersion) {
        self.mutations
            .push(OrderMutation::UpdateOrder { order, expected });
    }

    pub fn remove_order(&mut self, id: OrderId, expected: ExpectedVersion) {
        self.mutations
            .push(OrderMutation::RemoveOrder { id, expected });
    }

    pub fn clear_line_items(&mut self, id: OrderId) {
        self.mutations.push(OrderMutation::ClearLineItems(id));
    }

    pub fn insert_line_item(&mut self, item: LineItem) {
        self.mutations.push(OrderMutation::InsertLineItem(item));
    }

    pub fn mutations(&self) -> &[OrderMutation] {
        &self.mutations
    }

    pub fn into_mutations(self) -> Vec<OrderMutation> {
        self.mutations
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

/// Gateway port for the order aggregate manager.
///
/// The aggregate is loaded fresh through these reads on every operation and
/// discarded after the response; `commit` is the only way state changes.
pub trait OrderGateway: Send + Sync {
    /// Allocate the next order id. Allocation survives failed commits, so
    /// id gaps are normal.
    fn next_order_id(&self) -> OrderId;

    fn order(&self, id: OrderId) -> Option<Order>;
    fn orders(&self) -> Vec<Order>;
    fn orders_by_status(&self, status: OrderStatus) -> Vec<Order>;

    /// Line items of one order, ordered by product id.
    fn line_items(&self, id: OrderId) -> Vec<LineItem>;

    /// Product lookup for price computation at read time.
    fn product(&self, id: ProductId) -> Option<Product>;

    /// Validate and apply every pending mutation atomically: foreign keys,
    /// check constraints, composite-key uniqueness, and expected versions
    /// are all verified before anything is written.
    fn commit(&self, uow: OrderUnitOfWork) -> StoreResult<()>;
}
