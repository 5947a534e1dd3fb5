//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns a store of
//! entities. It implements the "Server" side of the Actor Model, processing
//! messages sequentially and ensuring exclusive access to the entity store.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Concurrency Model
/// The actor processes its messages *sequentially* in one Tokio task, so the
/// `store` needs no `Mutex`. Every request observes the effects of all requests
/// received before it. In particular a check-and-decrement expressed as an
/// [`ActorEntity::handle_action`] can never interleave with another one.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use resource_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, hits: u32 }
/// #[derive(Debug)] struct CounterCreate;
/// #[derive(Debug)] struct CounterUpdate;
/// #[derive(Debug)] enum CounterAction { Hit }
/// #[derive(Debug)] struct CounterError;
///
/// impl std::fmt::Display for CounterError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "counter error") }
/// }
/// impl std::error::Error for CounterError {}
///
/// #[async_trait]
/// impl ActorEntity for Counter {
///     type Id = u32;
///     type Create = CounterCreate;
///     type Update = CounterUpdate;
///     type Action = CounterAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, hits: 0 })
///     }
///     async fn on_update(&mut self, _: CounterUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, Self::Error> {
///         self.hits += 1;
///         Ok(self.hits)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let counter = client.create(CounterCreate).await.unwrap();
///     let hits = client.perform_action(counter.id, CounterAction::Hit).await.unwrap();
///     assert_eq!(hits, 1);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: takes the next id from the `u32` sequence, builds the entity,
///   rejects it if it conflicts with a stored one, runs `on_create`, stores it.
/// * **Get / List**: clone out one entity or all of them (ordered by id).
/// * **Update**: runs `on_update` on a staged clone.
/// * **Delete**: runs `on_delete`, then removes the entity.
/// * **Action**: runs `handle_action` on a staged clone.
/// * **Transact**: runs every step on staged clones; commits them only if all
///   steps succeeded.
///
/// # Abandoned Requests
/// A request whose caller stopped waiting (timeout, dropped future) is skipped.
/// Writes are committed only after the reply was handed to a waiting caller; if
/// the caller left while the hooks ran, the staged change is dropped.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. If the channel is full,
    /// calls to the client wait until there is space (bounded by the client timeout).
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Product" instead of "order_workflow::model::product::Product"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            if msg.is_abandoned() {
                debug!(entity_type, request = msg.kind(), "Caller gone, skipping");
                continue;
            }

            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    match self.stage_create(id.clone(), params, &context).await {
                        Ok(item) => {
                            if deliver(respond_to, item.clone()) {
                                self.next_id += 1;
                                self.store.insert(id, item);
                                info!(entity_type, size = self.store.len(), "Created");
                            } else {
                                warn!(entity_type, %id, "Caller gone, create discarded");
                            }
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let mut items: Vec<T> = Vec::with_capacity(self.store.len());
                    let mut ids: Vec<&T::Id> = self.store.keys().collect();
                    ids.sort();
                    for id in ids {
                        if let Some(item) = self.store.get(id) {
                            items.push(item.clone());
                        }
                    }
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    // Hooks work on a copy so a failed update leaves the stored entity intact
                    let mut staged = item.clone();
                    if let Err(e) = staged.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if deliver(respond_to, staged.clone()) {
                        self.store.insert(id.clone(), staged);
                        info!(entity_type, %id, "Updated");
                    } else {
                        warn!(entity_type, %id, "Caller gone, update discarded");
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if deliver(respond_to, ()) {
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                    } else {
                        warn!(entity_type, %id, "Caller gone, delete discarded");
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    let mut staged = item.clone();
                    match staged.handle_action(action, &context).await {
                        Ok(result) => {
                            if deliver(respond_to, result) {
                                self.store.insert(id.clone(), staged);
                                info!(entity_type, %id, "Action ok");
                            } else {
                                warn!(entity_type, %id, "Caller gone, action discarded");
                            }
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Transact { steps, respond_to } => {
                    debug!(entity_type, ?steps, "Transact");
                    let step_count = steps.len();
                    match self.stage_transaction(steps, &context).await {
                        Ok((staged, results)) => {
                            if deliver(respond_to, results) {
                                self.store.extend(staged);
                                info!(entity_type, steps = step_count, "Transaction committed");
                            } else {
                                warn!(entity_type, steps = step_count, "Caller gone, transaction discarded");
                            }
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Transaction aborted");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Builds and checks a new entity without storing it.
    async fn stage_create(
        &self,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut item = T::from_create_params(id, params)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        if let Some(clash) = self
            .store
            .values()
            .find_map(|existing| item.conflicts_with(existing))
        {
            return Err(FrameworkError::Conflict(clash));
        }

        item.on_create(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        Ok(item)
    }

    /// Applies every step to staged clones and returns them with the results.
    ///
    /// A step may touch an entity an earlier step already staged; it then sees
    /// that step's effects. The caller writes the clones back only once the
    /// results have been delivered.
    async fn stage_transaction(
        &self,
        steps: Vec<(T::Id, T::Action)>,
        context: &T::Context,
    ) -> Result<(HashMap<T::Id, T>, Vec<T::ActionResult>), FrameworkError> {
        let mut staged: HashMap<T::Id, T> = HashMap::new();
        let mut results = Vec::with_capacity(steps.len());

        for (id, action) in steps {
            let item = match staged.entry(id.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let current = self
                        .store
                        .get(&id)
                        .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
                    entry.insert(current.clone())
                }
            };
            let result = item
                .handle_action(action, context)
                .await
                .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
            results.push(result);
        }

        Ok((staged, results))
    }
}

/// Hands a successful result to the caller; `false` if nobody is waiting for it.
fn deliver<R>(respond_to: Response<R>, value: R) -> bool {
    respond_to.send(Ok(value)).is_ok()
}
