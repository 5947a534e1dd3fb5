//! # User Client
//!
//! Provides a high‑level API for interacting with the `User` actor.
//! It wraps a `ResourceClient<User>` and exposes domain‑specific methods.
use crate::model::{Identity, User, UserCreate, UserId, UserUpdate};
use crate::user_actor::UserError;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.entity_error::<UserError>() {
            Some(err) => err.clone(),
            None => UserError::ActorCommunicationError(e.to_string()),
        }
    }
}

impl UserClient {
    /// Registers a new user. Usernames are unique.
    #[instrument(skip(self))]
    pub async fn register(&self, params: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        let username = params.username.trim().to_string();
        self.inner.create(params).await.map_err(|e| match e {
            FrameworkError::Conflict(_) => UserError::AlreadyExists(username),
            other => Self::map_error(other),
        })
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(|e| match e {
            FrameworkError::NotFound(_) => UserError::NotFound(id),
            other => Self::map_error(other),
        })
    }

    /// Resolves the identity a registered user acts under.
    #[instrument(skip(self))]
    pub async fn identity(&self, id: UserId) -> Result<Identity, UserError> {
        self.get(id)
            .await?
            .map(|user| Identity::from(&user))
            .ok_or(UserError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let users = self.list().await?;
        Ok(users.into_iter().find(|user| user.username == username))
    }
}
