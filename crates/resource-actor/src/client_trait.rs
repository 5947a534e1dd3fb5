//! # ActorClient Trait
//!
//! Provides a common interface for resource‑specific clients, adding default `get` and
//! `list` methods built on top of a generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read operations.
///
/// # Example
///
/// ```rust
/// use resource_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Sku { id: u32 }
/// #[derive(Debug)] struct SkuCreate;
/// #[derive(Debug)] struct SkuUpdate;
/// #[derive(Debug)] enum SkuAction {}
/// #[derive(Debug)] struct SkuError(String);
///
/// impl std::fmt::Display for SkuError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{}", self.0)
///     }
/// }
/// impl std::error::Error for SkuError {}
/// impl From<String> for SkuError {
///     fn from(s: String) -> Self { SkuError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Sku {
///     type Id = u32;
///     type Create = SkuCreate;
///     type Update = SkuUpdate;
///     type Action = SkuAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = SkuError;
///
///     fn from_create_params(id: u32, _: SkuCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id })
///     }
///     async fn on_update(&mut self, _: SkuUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: SkuAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct SkuClient {
///     inner: ResourceClient<Sku>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Sku> for SkuClient {
///     type Error = SkuError;
///
///     fn inner(&self) -> &ResourceClient<Sku> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         SkuError(e.to_string())
///     }
/// }
///
/// async fn usage(client: SkuClient) {
///     // get() and list() are provided automatically
///     let _ = client.get(1).await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity, ordered by ID.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
