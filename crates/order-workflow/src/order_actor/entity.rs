//! [`ActorEntity`] implementation for the [`Order`] domain type.
//!
//! See the trait implementation on [`Order`] for method documentation.

use super::OrderError;
use crate::model::{LineItem, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = OrderError;

    /// Creates a new Pending order stamped with the current time.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            owner: params.owner,
            status: OrderStatus::Pending,
            total_price: 0,
            ordered_at: Utc::now(),
            line_items: params.line_items,
        })
    }

    /// Validates the line items and derives the total.
    async fn on_create(&mut self, _ctx: &()) -> Result<(), Self::Error> {
        self.total_price = derive_total(&self.line_items)?;
        Ok(())
    }

    /// Applies a status change and/or replaces the line items.
    ///
    /// # Errors
    /// - `InvalidStatusTransition` if the state machine forbids the change
    /// - `ValidationError` if the new line items are empty or contain a zero quantity
    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(next) = update.status {
            if !self.status.can_transition_to(next) {
                return Err(OrderError::InvalidStatusTransition {
                    order_id: self.id,
                    from: self.status,
                    to: next,
                });
            }
            self.status = next;
        }
        if let Some(items) = update.line_items {
            self.total_price = derive_total(&items)?;
            self.line_items = items;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn derive_total(items: &[LineItem]) -> Result<u64, OrderError> {
    if items.is_empty() {
        return Err(OrderError::ValidationError(
            "an order needs at least one line item".into(),
        ));
    }
    if let Some(item) = items.iter().find(|item| item.quantity == 0) {
        return Err(OrderError::ValidationError(format!(
            "quantity for {} must be positive",
            item.product_id
        )));
    }
    Order::compute_total(items)
        .ok_or_else(|| OrderError::ValidationError("order total overflows".into()))
}
