//! # Generic Client
//!
//! This module defines the generic client for communicating with actors.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout_at, Instant};

/// Default upper bound on a single request, queueing included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A type-safe client for interacting with a `ResourceActor`.
///
/// The client holds only a sender, so cloning is cheap and clones can be shared
/// across tasks. Every call is bounded by the client's timeout.
///
/// A call either returns the actor's result, or fails and leaves the store as it
/// was: the actor only commits a change once the reply reached a caller that is
/// still waiting, and a caller that times out closes its reply channel before
/// giving up.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    timeout: Duration,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self {
            sender,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Returns a client that gives up on each request after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let deadline = Instant::now() + self.timeout;
        let (respond_to, mut response) = oneshot::channel();

        // A send that times out was never queued
        timeout_at(deadline, self.sender.send(build(respond_to)))
            .await
            .map_err(|_| FrameworkError::Timeout(self.timeout))?
            .map_err(|_| FrameworkError::ActorClosed)?;

        let reply = timeout_at(deadline, &mut response).await;
        match reply {
            Ok(reply) => reply.map_err(|_| FrameworkError::ActorDropped)?,
            Err(_) => {
                // After close() the actor can no longer deliver, so it discards the
                // request; a reply that got in first is still ours.
                response.close();
                response
                    .try_recv()
                    .unwrap_or(Err(FrameworkError::Timeout(self.timeout)))
            }
        }
    }

    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Runs `steps` as one all-or-nothing transaction inside the actor.
    ///
    /// Results come back in step order. On failure no step has taken effect.
    pub async fn transact(
        &self,
        steps: Vec<(T::Id, T::Action)>,
    ) -> Result<Vec<T::ActionResult>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Transact { steps, respond_to })
            .await
    }
}
