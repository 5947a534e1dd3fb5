//! Custom actions for the Product actor.
//!
//! This module defines the stock operations that can be performed on a
//! [`Product`](crate::model::Product) entity. They are handled by
//! [`ActorEntity::handle_action`](resource_actor::ActorEntity::handle_action) and can
//! be combined into one all-or-nothing `Transact` request.

/// Custom actions for Product entities.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Takes `u32` units out of stock.
    ///
    /// # Errors
    /// Fails without modifying the product if the amount exceeds available stock.
    Reserve(u32),
    /// Puts `u32` previously reserved units back into stock.
    Release(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Current stock level
    CheckStock(u32),
    /// Unit price at the moment of reservation
    Reserve { unit_price: u64 },
    /// Stock level after the release
    Release { available: u32 },
}
