//! # ActorClient Trait
//!
//! Shared plumbing for domain clients that wrap a [`ResourceClient`].
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Gives a domain client `get`, `list` and `delete` for free, with framework errors
/// mapped into the domain's own error type.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Bin { id: u32 }
/// #[derive(Debug)] struct BinCreate;
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct BinError(String);
/// impl From<String> for BinError { fn from(s: String) -> Self { BinError(s) } }
///
/// #[async_trait]
/// impl ActorEntity for Bin {
///     type Id = u32; type Create = BinCreate; type Update = (); type Action = ();
///     type ActionResult = (); type Context = (); type Error = BinError;
///     fn from_create_params(id: u32, _: BinCreate) -> Result<Self, BinError> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), BinError> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), BinError> { Ok(()) }
/// }
///
/// struct BinClient { inner: ResourceClient<Bin> }
///
/// #[async_trait]
/// impl ActorClient<Bin> for BinClient {
///     type Error = BinError;
///     fn inner(&self) -> &ResourceClient<Bin> { &self.inner }
///     fn map_error(e: FrameworkError) -> BinError { BinError(e.to_string()) }
/// }
///
/// async fn usage(client: BinClient) {
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

    /// Fetch every entity.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
