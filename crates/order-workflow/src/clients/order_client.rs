//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor (the Order Store).
//! It performs no stock or authorization checks; those belong to
//! [`OrderWorkflow`](crate::workflow::OrderWorkflow).
use crate::model::{Order, OrderCreate, OrderId, OrderUpdate};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.entity_error::<OrderError>() {
            Some(err) => err.clone(),
            None => OrderError::ActorCommunicationError(e.to_string()),
        }
    }
}

impl OrderClient {
    /// Persists a new Pending order and returns it with its id and total.
    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_order(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(|e| match e {
            FrameworkError::NotFound(_) => OrderError::OrderNotFound(id),
            other => Self::map_error(other),
        })
    }
}
