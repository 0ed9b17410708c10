//! # Generic Messages
//!
//! The message types exchanged between a [`ResourceClient`](crate::framework::ResourceClient)
//! and its [`ResourceActor`](crate::framework::ResourceActor).

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to the actor.
///
/// The variants map to the resource lifecycle:
///
/// - **Create**: builds a new entity from [`ActorEntity::Create`].
/// - **Get**: fetches one entity by ID.
/// - **Update**: applies [`ActorEntity::Update`] to one entity.
/// - **Delete**: removes one entity.
/// - **Action**: runs a mutating [`ActorEntity::Action`] on one entity.
/// - **Query**: runs a read-only [`ActorEntity::Query`] over the whole store.
///
/// Because the enum is generic over `T: ActorEntity`, a payload for one resource type cannot be
/// sent to an actor managing another.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
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
    Query {
        query: T::Query,
        respond_to: Response<T::QueryResult>,
    },
}
