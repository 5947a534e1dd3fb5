//! # User Actor
//!
//! This module implements the User resource actor, the directory that turns a
//! registered account into the [`Identity`](crate::model::Identity) the workflow
//! engine authorizes against.
//!
//! ## Overview
//!
//! The User actor is the simplest actor in the system: no dependencies and no custom
//! actions. Registration is a plain `Create`; uniqueness of usernames is enforced by
//! [`ActorEntity::conflicts_with`](resource_actor::ActorEntity::conflicts_with), which
//! the actor checks inside its own task, so two concurrent registrations of the same
//! name can never both succeed.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use order_workflow::config::WorkflowConfig;
//! use order_workflow::user_actor;
//! use order_workflow::model::UserCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create actor and client
//!     let (actor, client) = user_actor::new(&WorkflowConfig::default());
//!
//!     // Start the actor (no dependencies, so context is ())
//!     tokio::spawn(actor.run(()));
//!
//!     // Use the client
//!     let alice = client
//!         .register(UserCreate::customer("alice", "alice@example.com"))
//!         .await?;
//!     let identity = client.identity(alice.id).await?;
//!     assert_eq!(identity.subject, "alice");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::config::WorkflowConfig;
use crate::model::User;
use resource_actor::ResourceActor;

/// Creates a new User actor and its client.
///
/// The channel capacity and the client's request timeout come from `config`.
pub fn new(config: &WorkflowConfig) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(config.channel_capacity);
    let client = UserClient::new(generic_client.with_timeout(config.store_timeout));
    (actor, client)
}
