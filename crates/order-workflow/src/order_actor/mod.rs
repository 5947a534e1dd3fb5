//! # Order Actor
//!
//! This module implements the Order Store: the Order resource actor that owns every
//! order aggregate (header and line items).
//!
//! ## Overview
//!
//! The store enforces what can be checked from the order alone: a non-empty list of
//! positive line items, a total that always equals the sum of the subtotals, and the
//! status state machine. Everything that needs other actors (stock, authorization,
//! cache) lives in the [`workflow`](crate::workflow) engine.
//!
//! Orders are never deleted; cancellation is a status change.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`], shared with the workflow engine
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::config::WorkflowConfig;
use crate::model::Order;
use resource_actor::ResourceActor;

/// Creates a new Order actor and its client.
///
/// The channel capacity and the client's request timeout come from `config`.
pub fn new(config: &WorkflowConfig) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(config.channel_capacity);
    let client = OrderClient::new(generic_client.with_timeout(config.store_timeout));
    (actor, client)
}
