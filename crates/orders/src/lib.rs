//! `orderdesk-orders` — the order lifecycle manager.
//!
//! Owns the Order aggregate and its line items: the status state machine
//! (Open → Closed / Canceled), wholesale line-item replacement while Open,
//! and the consistency rules between status and line-item content. All
//! durable state goes through the [`OrderGateway`] port as atomic units of
//! work.

pub mod gateway;
pub mod order;
pub mod service;

pub use gateway::{OrderGateway, OrderMutation, OrderUnitOfWork};
pub use order::{LineDetail, LineItem, LineItemInput, NewOrder, Order, OrderDetail, OrderStatus};
pub use service::{DeleteOutcome, OrderService};
