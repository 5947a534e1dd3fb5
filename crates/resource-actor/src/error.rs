//! # Framework Errors
//!
//! This module defines the common error types used throughout the resource actor.
//! By centralizing error definitions, every store built on the framework
//! reports channel failures, timeouts and missing entities the same way.

use std::time::Duration;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item conflicts with existing {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Returns the entity's own error if this is an [`FrameworkError::EntityError`]
    /// wrapping an `E`.
    ///
    /// Clients use this to recover typed domain errors (e.g. insufficient stock)
    /// after they crossed the channel boundary as a boxed trait object.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::EntityError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}
