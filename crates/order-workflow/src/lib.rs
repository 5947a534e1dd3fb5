//! # Order Workflow
//!
//! Order placement with atomic inventory reservation and a best-effort order cache,
//! built on the [`resource_actor`] framework.
//!
//! ## Core Components
//!
//! - **[model]**: Plain data ([`User`](model::User), [`Product`](model::Product),
//!   [`Order`](model::Order), [`Identity`](model::Identity)) and the cached
//!   [`OrderView`](model::OrderView).
//! - **[user_actor], [product_actor], [order_actor]**: the stores, each a
//!   `ResourceActor` with its entity hooks and error type.
//! - **[clients]**: Type-safe wrappers that hide the message passing.
//! - **[cache]**: The [`OrderCache`](cache::OrderCache) contract and its moka-backed
//!   implementation.
//! - **[workflow]**: The [`OrderWorkflow`](workflow::OrderWorkflow) engine.
//! - **[config]** and **[lifecycle]**: Environment configuration and the
//!   [`OrderSystem`](lifecycle::OrderSystem) that starts and stops everything.
//!
//! ## Testing
//!
//! See [`resource_actor::mock`] for utilities to test clients and the workflow
//! without spawning actors.

pub mod cache;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod user_actor;
pub mod workflow;
