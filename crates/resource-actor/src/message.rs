//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map to the standard CRUD lifecycle plus two extensions:
///
/// - **Create**: Uses [`ActorEntity::Create`] to initialize a new resource and returns it.
/// - **Get / List**: Reads one resource, or all of them ordered by id.
/// - **Update**: Uses [`ActorEntity::Update`] to modify an existing resource.
/// - **Delete**: Removes the resource.
/// - **Action**: Executes a custom [`ActorEntity::Action`] on one resource.
/// - **Transact**: Executes a sequence of actions over several resources,
///   all-or-nothing.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Transact {
        steps: Vec<(T::Id, T::Action)>,
        respond_to: Response<Vec<T::ActionResult>>,
    },
}

impl<T: ActorEntity> ResourceRequest<T> {
    /// Short name of the request, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceRequest::Create { .. } => "Create",
            ResourceRequest::Get { .. } => "Get",
            ResourceRequest::List { .. } => "List",
            ResourceRequest::Update { .. } => "Update",
            ResourceRequest::Delete { .. } => "Delete",
            ResourceRequest::Action { .. } => "Action",
            ResourceRequest::Transact { .. } => "Transact",
        }
    }

    /// Whether the caller stopped waiting for the response.
    pub fn is_abandoned(&self) -> bool {
        match self {
            ResourceRequest::Create { respond_to, .. } => respond_to.is_closed(),
            ResourceRequest::Get { respond_to, .. } => respond_to.is_closed(),
            ResourceRequest::List { respond_to } => respond_to.is_closed(),
            ResourceRequest::Update { respond_to, .. } => respond_to.is_closed(),
            ResourceRequest::Delete { respond_to, .. } => respond_to.is_closed(),
            ResourceRequest::Action { respond_to, .. } => respond_to.is_closed(),
            ResourceRequest::Transact { respond_to, .. } => respond_to.is_closed(),
        }
    }
}
