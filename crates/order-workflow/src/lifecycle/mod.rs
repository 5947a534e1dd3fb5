//! # System Lifecycle & Orchestration
//!
//! This module starts, wires and stops the actors behind the order workflow.
//!
//! ## The OrderSystem Pattern
//!
//! Individual actors are simple; wiring them together is where the complexity
//! lives. [`OrderSystem`] is the conductor:
//!
//! 1. **Actor Creation** - each actor and its typed client, sized from [`WorkflowConfig`](crate::config::WorkflowConfig)
//! 2. **Startup** - every actor runs in its own Tokio task
//! 3. **Composition** - the [`OrderWorkflow`](crate::workflow::OrderWorkflow) gets the
//!    product and order clients plus the configured cache
//! 4. **Graceful Shutdown** - dropping every client closes the channels; each actor
//!    drains its queue and exits, and [`OrderSystem::shutdown`] awaits them
//!
//! ```rust
//! use order_workflow::config::WorkflowConfig;
//! use order_workflow::lifecycle::OrderSystem;
//!
//! #[tokio::main]
//! async fn main() {
//!     let system = OrderSystem::new(WorkflowConfig::default());
//!     // ... use system.workflow, system.users, system.products ...
//!     system.shutdown().await.unwrap();
//! }
//! ```
//!
//! None of the actors depends on another (their `Context` is `()`); cross-actor
//! coordination happens in the workflow engine, so the dependency graph is acyclic
//! and channel closure is enough to stop everything.
//!
//! ## Observability
//!
//! [`setup_tracing`] (re-exported from the framework) installs the subscriber.
//! Control verbosity with `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # state changes and status audit records
//! RUST_LOG=debug cargo run     # full request payloads and cache hits
//! ```

pub mod order_system;

pub use order_system::*;
pub use resource_actor::tracing::setup_tracing;
