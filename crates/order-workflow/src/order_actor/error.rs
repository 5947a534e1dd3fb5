//! Error types for the Order actor and the order workflow.

use crate::model::{OrderId, OrderStatus, ProductId};
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// Stock and not-found conditions are not transient; callers should not retry them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// A line item references a product that does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// A line item asks for more than the product has in stock.
    #[error("Insufficient stock for {product_id}: available {available}")]
    InsufficientStock {
        product_id: ProductId,
        available: u32,
    },

    /// The requested order was not found.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The caller is authenticated but neither the owner nor an administrator.
    #[error("Unauthorized access to {0}")]
    UnauthorizedOrderAccess(OrderId),

    /// The status change is not allowed by the order state machine.
    #[error("Invalid status transition for {order_id}: {from} -> {to}")]
    InvalidStatusTransition {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<ProductError> for OrderError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => OrderError::ProductNotFound(id),
            ProductError::InsufficientStock {
                product_id,
                available,
                ..
            } => OrderError::InsufficientStock {
                product_id,
                available,
            },
            ProductError::ValidationError(msg) => OrderError::ValidationError(msg),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
