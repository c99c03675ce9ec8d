//! # Resource Messages
//!
//! The request envelope exchanged between a [`ResourceClient`](crate::ResourceClient)
//! and its [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A request addressed to the actor that owns every entity of type `T`.
///
/// The variants cover the lifecycle of a stored resource (create, read, list,
/// update, delete) plus `Action` for domain operations that need exclusive access
/// to one entity, such as decrementing a stock counter or advancing an order's
/// status. Payload types come from the [`ActorEntity`] associated types, so a
/// product's `Create` payload can never be sent to the order actor.
///
/// `Create` answers with the stored entity rather than just its id: a caller that
/// has just persisted a record must not need a second round trip (which could fail
/// independently) to learn what was written.
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
}
