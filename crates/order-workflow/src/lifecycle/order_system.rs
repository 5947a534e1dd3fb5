use crate::cache::{MokaOrderCache, NoopOrderCache, OrderCache};
use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::config::WorkflowConfig;
use crate::workflow::OrderWorkflow;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Errors reported while stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTaskFailed(String),
}

/// The runtime orchestrator for the order system.
///
/// `OrderSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping all actors in the system
/// - **Composition**: Building the [`OrderWorkflow`] on top of the stores and the cache
///
/// # Architecture
///
/// - **User Actor**: identity directory (registration, lookup)
/// - **Product Actor**: Catalog Store with atomic stock reservation
/// - **Order Actor**: Order Store
/// - **Workflow**: the engine callers use for everything order-related
pub struct OrderSystem {
    /// Client for interacting with the User actor
    pub users: UserClient,

    /// Client for interacting with the Product actor
    pub products: ProductClient,

    /// Client for interacting with the Order actor
    pub orders: OrderClient,

    /// Order workflow engine
    pub workflow: OrderWorkflow,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    /// Creates and starts the system with the cache selected by `config`.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: WorkflowConfig) -> Self {
        let cache: Arc<dyn OrderCache> = if config.cache_enabled {
            Arc::new(MokaOrderCache::new(config.cache_capacity))
        } else {
            Arc::new(NoopOrderCache)
        };
        Self::with_cache(config, cache)
    }

    /// Creates and starts the system around a caller-supplied cache.
    pub fn with_cache(config: WorkflowConfig, cache: Arc<dyn OrderCache>) -> Self {
        // 1. Create actors
        let (user_actor, users) = crate::user_actor::new(&config);
        let (product_actor, products) = crate::product_actor::new(&config);
        let (order_actor, orders) = crate::order_actor::new(&config);

        // 2. Start actors (no context dependencies)
        let handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(product_actor.run(())),
            tokio::spawn(order_actor.run(())),
        ];

        // 3. Compose the workflow
        let workflow = OrderWorkflow::new(products.clone(), orders.clone(), cache, &config);

        info!(
            channel_capacity = config.channel_capacity,
            cache_enabled = config.cache_enabled,
            restock_on_cancel = config.restock_on_cancel,
            "Order system started"
        );

        Self {
            users,
            products,
            orders,
            workflow,
            handles,
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Drops every client held by the system, then waits for all actor tasks.
    /// Clones of the clients or the workflow that are still alive elsewhere keep
    /// their actors running, so drop them before calling this.
    ///
    /// # Errors
    /// `ActorTaskFailed` if any actor task panicked.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        let Self {
            users,
            products,
            orders,
            workflow,
            handles,
        } = self;

        // Dropping the senders makes each actor's recv() return None
        drop(workflow);
        drop(users);
        drop(products);
        drop(orders);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(SystemError::ActorTaskFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
