use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// `get`, `delete` and `act`, with framework errors already mapped to the
/// client's own error type.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// The error reported when `id` does not exist.
    fn not_found(id: T::Id) -> Self::Error;

    /// Like [`map_error`](Self::map_error), but a missing entity becomes
    /// [`not_found`](Self::not_found) for `id`.
    fn map_error_for(id: T::Id, e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(_) => Self::not_found(id),
            other => Self::map_error(other),
        }
    }

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .delete(id.clone())
            .await
            .map_err(|e| Self::map_error_for(id, e))
    }

    /// Run a resource-specific action against one entity.
    #[tracing::instrument(skip(self))]
    async fn act(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .perform_action(id.clone(), action)
            .await
            .map_err(|e| Self::map_error_for(id, e))
    }
}
