//! # Typed Clients
//!
//! Wrappers around [`ResourceClient`](resource_actor::ResourceClient) that speak the
//! domain's language: typed arguments, typed results and per-actor error enums
//! instead of [`FrameworkError`](resource_actor::FrameworkError).
//!
//! Each client implements [`ActorClient`](resource_actor::ActorClient) and so inherits
//! `get` and `list`. Entity errors that crossed the channel boxed are recovered by
//! downcasting, so callers can match on e.g. `ProductError::InsufficientStock`.

pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use user_client::UserClient;
