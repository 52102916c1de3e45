//! Order aggregate: records, status state machine, transition guards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderdesk_core::{
    CustomerId, DomainError, DomainResult, Entity, OrderId, ProductId, StoreError, StoreResult,
};

/// Order status lifecycle.
///
/// `Open` is the only state that accepts mutation; `Closed` and `Canceled`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Closed,
    Canceled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Closed | OrderStatus::Canceled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Closed => "closed",
            OrderStatus::Canceled => "canceled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(OrderStatus::Open),
            "closed" => Ok(OrderStatus::Closed),
            "canceled" => Ok(OrderStatus::Canceled),
            other => Err(DomainError::validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// Order header row as persisted.
///
/// `version` is the optimistic concurrency token; it never leaves the
/// process and is skipped on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    /// Stamped at creation and re-stamped on every status change (including
    /// the permitted Open→Open touch). Line-item updates leave it alone.
    pub updated_at: DateTime<Utc>,
    pub status: OrderStatus,
    #[serde(skip)]
    pub version: u64,
}

impl Order {
    /// Guard shared by every mutation: terminal orders accept nothing.
    pub fn ensure_mutable(&self) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::invalid_state(
                "cannot modify a closed or canceled order",
            ));
        }
        Ok(())
    }

    /// Status-transition guard.
    ///
    /// The empty-close check runs BEFORE the terminal check: closing an
    /// order without products reports that specific reason no matter what
    /// state the order is in. The precedence is load-bearing for callers
    /// that branch on the message.
    pub fn guard_transition(
        &self,
        new_status: OrderStatus,
        line_count: usize,
    ) -> DomainResult<()> {
        if new_status == OrderStatus::Closed && line_count == 0 {
            return Err(DomainError::invalid_state(
                "cannot close an order without products",
            ));
        }
        self.ensure_mutable()
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &OrderId {
        &self.id
    }
}

/// Line item row: at most one per (order, product).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
}

impl LineItem {
    /// Check constraint carried by the schema: quantity strictly positive.
    pub fn check(&self) -> StoreResult<()> {
        if self.quantity <= 0 {
            return Err(StoreError::Check(format!(
                "line item quantity must be positive (got {})",
                self.quantity
            )));
        }
        Ok(())
    }
}

/// Requested line-item content; the manager attaches the order id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItemInput {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Input for creating an order. An empty line-item list is allowed; the
/// order just cannot be closed until it has products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub line_items: Vec<LineItemInput>,
}

/// Read model for a single order: header plus priced lines.
///
/// Line totals are derived from the CURRENT product price at read time,
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    pub order: Order,
    pub lines: Vec<LineDetail>,
}

impl OrderDetail {
    /// Sum of line totals.
    pub fn total(&self) -> u64 {
        self.lines.iter().map(|l| l.total).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDetail {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: u64,
    pub total: u64,
}
