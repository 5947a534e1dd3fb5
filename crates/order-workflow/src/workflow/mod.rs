//! # Order Workflow
//!
//! The engine that coordinates the Catalog Store (product actor), the Order Store
//! (order actor) and the [`OrderCache`](crate::cache::OrderCache) to create, read,
//! update and cancel orders.
//!
//! ## Guarantees
//!
//! - **All-or-nothing reservation**: every line of an order is reserved in one
//!   transaction; a missing product or short stock leaves the catalog untouched.
//! - **No oversell**: reservations run inside the product actor, so concurrent
//!   orders can never drive stock below zero.
//! - **Compensation**: if persisting an order fails after stock was reserved, the
//!   reservation is released again.
//! - **Cancellation safety**: the steps that move stock run in a spawned task. A
//!   caller that gives up can only do so before stock was touched; once the commit
//!   has started it runs to completion.
//! - **Timeouts are clean**: a store call that times out has not taken effect and
//!   never will, so the compensation after it restores exactly what was moved.
//! - **Uniform authorization**: reads check owner or administrator on cache hits and
//!   store reads alike; a rejected read never fills the cache.
//! - **No stale overwrite**: a view read from the store is cached before any later
//!   update or cancellation commits, never after it.
//! - **Best-effort cache**: cache failures are logged and never fail an operation.
//!
//! ## Structure
//!
//! - [`engine`] - [`OrderWorkflow`] and [`OrderFilter`]
//! - [`audit`] - [`StatusChange`] records broadcast on every status change

pub mod audit;
pub mod engine;

pub use audit::StatusChange;
pub use engine::{OrderFilter, OrderWorkflow};
