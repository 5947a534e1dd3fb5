//! # Resource Actor
//!
//! This crate provides the building blocks for in-process, type-safe stores built on
//! the **Actor Model**. Each store is a [`ResourceActor`] that owns a map of entities
//! inside a single Tokio task, serving a **Resource-Oriented** request set
//! (Create, Get, List, Update, Delete, Action, Transact) to any number of cloned
//! [`ResourceClient`]s.
//!
//! ## Why an actor per store?
//!
//! - Isolated state: no shared memory, no locks around the map.
//! - Sequential processing: a read-check-write inside one request can never race
//!   with another request, which makes conditional updates (such as "decrement if
//!   enough stock") atomic without compare-and-swap.
//! - Multi-entity transactions: [`ResourceClient::transact`] applies a list of
//!   actions to staged copies and commits them together or not at all.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Your business logic and domain models
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message processing and concurrency
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - Type-safe communication
//!
//! ## Example
//!
//! ```rust
//! use resource_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Account { id: u32, balance: u64 }
//!
//! #[derive(Debug)] struct AccountCreate { balance: u64 }
//! #[derive(Debug)] struct AccountUpdate;
//! #[derive(Debug)] enum AccountAction { Withdraw(u64), Deposit(u64) }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("insufficient funds")]
//! struct AccountError;
//!
//! #[async_trait]
//! impl ActorEntity for Account {
//!     type Id = u32;
//!     type Create = AccountCreate;
//!     type Update = AccountUpdate;
//!     type Action = AccountAction;
//!     type ActionResult = u64;
//!     type Context = ();
//!     type Error = AccountError;
//!
//!     fn from_create_params(id: u32, params: AccountCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, balance: params.balance })
//!     }
//!
//!     async fn on_update(&mut self, _: AccountUpdate, _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: AccountAction, _: &()) -> Result<u64, Self::Error> {
//!         match action {
//!             AccountAction::Withdraw(amount) => {
//!                 self.balance = self.balance.checked_sub(amount).ok_or(AccountError)?;
//!             }
//!             AccountAction::Deposit(amount) => self.balance += amount,
//!         }
//!         Ok(self.balance)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Account>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let a = client.create(AccountCreate { balance: 100 }).await.unwrap();
//!     let b = client.create(AccountCreate { balance: 0 }).await.unwrap();
//!
//!     // Both steps commit together
//!     client
//!         .transact(vec![(a.id, AccountAction::Withdraw(60)), (b.id, AccountAction::Deposit(60))])
//!         .await
//!         .unwrap();
//!
//!     // The second withdrawal fails, so the deposit before it is discarded too
//!     let failed = client
//!         .transact(vec![(b.id, AccountAction::Deposit(500)), (a.id, AccountAction::Withdraw(500))])
//!         .await;
//!     assert!(failed.is_err());
//!     assert_eq!(client.get(b.id).await.unwrap().unwrap().balance, 60);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are injected at **runtime** via `run(context)`, not at construction
//! time, so actors can be created first and wired afterwards.
//!
//! ## Testing
//!
//! The [`mock`] module offers a `MockClient` that speaks the same channel protocol as
//! a real actor but answers from queued expectations, so typed clients can be tested
//! without spawning actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::{ResourceClient, DEFAULT_TIMEOUT};
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
