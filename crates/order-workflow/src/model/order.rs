use crate::model::ProductId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Lifecycle state of an order.
///
/// ```text
/// Pending ──► Confirmed
///    │            │
///    └──► Cancelled ◄┘
/// ```
///
/// Nothing leaves `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in this state may move to `next`.
    ///
    /// Staying in the same state is always allowed.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Pending)
                | (Confirmed, Confirmed)
                | (Cancelled, Cancelled)
                | (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// One (product, quantity) pair as requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl LineItemRequest {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// A reserved line item with the unit price captured at reservation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: u64,
}

impl LineItem {
    /// `quantity × unit_price`, or `None` on overflow.
    pub fn subtotal(&self) -> Option<u64> {
        self.unit_price.checked_mul(u64::from(self.quantity))
    }
}

impl From<&LineItem> for LineItemRequest {
    fn from(item: &LineItem) -> Self {
        Self::new(item.product_id, item.quantity)
    }
}

/// Represents a customer order.
///
/// `total_price` is always the sum of the line items' subtotals; the order
/// actor derives it and never accepts it from callers.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Update parameters ([`OrderUpdate`])
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub owner: String,
    pub status: OrderStatus,
    pub total_price: u64,
    pub ordered_at: DateTime<Utc>,
    pub line_items: Vec<LineItem>,
}

impl Order {
    /// Sum of all subtotals, or `None` if it does not fit in a `u64`.
    pub fn compute_total(items: &[LineItem]) -> Option<u64> {
        items
            .iter()
            .try_fold(0u64, |total, item| total.checked_add(item.subtotal()?))
    }
}

/// Payload for persisting a new order. The total is derived, never supplied.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub owner: String,
    pub line_items: Vec<LineItem>,
}

/// Fields a caller may change on an existing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub line_items: Option<Vec<LineItem>>,
}

/// Changes a caller asks the workflow to make to an order.
///
/// Unlike [`OrderUpdate`], line items are requests: the workflow reserves them and
/// captures their prices before anything is persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderChanges {
    pub status: Option<OrderStatus>,
    pub line_items: Option<Vec<LineItemRequest>>,
}

/// Persisted and cached representation of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub order_id: OrderId,
    pub owner_identity: String,
    pub status: OrderStatus,
    pub total_price: u64,
    pub ordered_at: DateTime<Utc>,
    pub line_items: Vec<LineItem>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            owner_identity: order.owner.clone(),
            status: order.status,
            total_price: order.total_price,
            ordered_at: order.ordered_at,
            line_items: order.line_items.clone(),
        }
    }
}

impl From<OrderView> for Order {
    fn from(view: OrderView) -> Self {
        Self {
            id: view.order_id,
            owner: view.owner_identity,
            status: view.status,
            total_price: view.total_price,
            ordered_at: view.ordered_at,
            line_items: view.line_items,
        }
    }
}
