//! [`ActorEntity`] implementation for the [`User`] domain type.

use super::UserError;
use crate::model::{User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        let username = params.username.trim().to_string();
        if username.is_empty() {
            return Err(UserError::ValidationError("username must not be empty".into()));
        }
        validate_email(&params.email)?;
        Ok(Self {
            id,
            username,
            email: params.email,
            is_admin: params.is_admin,
        })
    }

    /// Usernames are unique; they double as the identity subject.
    fn conflicts_with(&self, other: &Self) -> Option<String> {
        (self.username == other.username).then(|| format!("username {}", other.username))
    }

    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(email) = update.email {
            validate_email(&email)?;
            self.email = email;
        }
        if let Some(is_admin) = update.is_admin {
            self.is_admin = is_admin;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), UserError> {
    if email.contains('@') {
        Ok(())
    } else {
        Err(UserError::ValidationError(format!("invalid email: {email}")))
    }
}
