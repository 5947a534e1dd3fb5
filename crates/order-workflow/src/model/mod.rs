//! # Domain Model
//!
//! Plain data types shared by the actors, the clients and the workflow engine.
//! Each entity type implements [`ActorEntity`](resource_actor::ActorEntity) in its
//! actor module (`user_actor`, `product_actor`, `order_actor`), keeping the data
//! definitions here free of runtime concerns.

pub mod identity;
pub mod order;
pub mod product;
pub mod user;

pub use identity::*;
pub use order::*;
pub use product::*;
pub use user::*;
