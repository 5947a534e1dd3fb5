//! # Product Actor
//!
//! This module implements the Catalog Store: the Product resource actor with stock
//! management as custom actions.
//!
//! ## Overview
//!
//! Stock only moves through [`ProductAction::Reserve`] and [`ProductAction::Release`].
//! Each action is a check-and-modify inside the actor's own task, so a reservation can
//! never interleave with another one and stock can never go negative. Orders with
//! several line items reserve through one `Transact` request, which commits every
//! line or none of them.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use order_workflow::config::WorkflowConfig;
//! use order_workflow::product_actor;
//! use order_workflow::model::{Identity, LineItemRequest, ProductCreate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create actor and client
//!     let (actor, client) = product_actor::new(&WorkflowConfig::default());
//!
//!     // Start the actor (no dependencies)
//!     tokio::spawn(actor.run(()));
//!
//!     // Only administrators may add products
//!     let admin = Identity::admin("root");
//!     let params = ProductCreate {
//!         name: "Widget".to_string(),
//!         price: 2999,
//!         quantity: 100,
//!     };
//!     let widget = client.create_product(&admin, params).await?;
//!
//!     // Reserve stock; the unit price is captured with the reservation
//!     let items = client
//!         .reserve_all(&[LineItemRequest::new(widget.id, 5)])
//!         .await?;
//!     assert_eq!(items[0].unit_price, 2999);
//!     assert_eq!(client.check_stock(widget.id).await?, 95);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::config::WorkflowConfig;
use crate::model::Product;
use resource_actor::ResourceActor;

/// Creates a new Product actor and its client.
///
/// The channel capacity and the client's request timeout come from `config`.
pub fn new(config: &WorkflowConfig) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(config.channel_capacity);
    let client = ProductClient::new(generic_client.with_timeout(config.store_timeout));
    (actor, client)
}
