//! # Generic Actor Server
//!
//! [`ResourceActor`] owns every entity of one type and processes requests for them
//! one at a time. That sequential loop is the only synchronization the storefront
//! needs: a stock counter is read and written inside a single message, so two
//! concurrent reservations against the same product can never interleave.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// ## Concurrency model
///
/// Each actor runs in its own Tokio task and handles one message at a time, so the
/// `store` needs no `Mutex`. Different actor types (products, orders) run in
/// parallel with each other.
///
/// ## Staged mutation
///
/// `Update` and `Action` hooks run against a working copy of the entity. The copy
/// replaces the stored entity only when the hook returns `Ok`; a hook that fails
/// halfway leaves the stored entity exactly as it was.
///
/// # Usage
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Shelf { id: u32, units: u32 }
/// #[derive(Debug)] struct ShelfCreate { units: u32 }
/// #[derive(Debug)] enum ShelfAction { Take(u32) }
/// #[derive(Debug, thiserror::Error)] #[error("empty shelf")] struct Empty;
///
/// #[async_trait]
/// impl ActorEntity for Shelf {
///     type Id = u32; type Create = ShelfCreate; type Update = ();
///     type Action = ShelfAction; type ActionResult = u32; type Context = (); type Error = Empty;
///     fn from_create_params(id: u32, p: ShelfCreate) -> Result<Self, Empty> {
///         Ok(Self { id, units: p.units })
///     }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Empty> { Ok(()) }
///     async fn handle_action(&mut self, a: ShelfAction, _: &()) -> Result<u32, Empty> {
///         match a {
///             ShelfAction::Take(n) if n <= self.units => { self.units -= n; Ok(self.units) }
///             ShelfAction::Take(_) => Err(Empty),
///         }
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Shelf>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let shelf = client.create(ShelfCreate { units: 3 }).await.unwrap();
///     assert_eq!(client.perform_action(shelf.id, ShelfAction::Take(2)).await.unwrap(), 1);
///     assert!(client.perform_action(shelf.id, ShelfAction::Take(2)).await.is_err());
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the request channel capacity; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is passed to each entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Product" rather than "storefront::model::product::Product"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let Some(following) = self.next_id.checked_add(1) else {
                        warn!(entity_type, "Id space exhausted");
                        let _ = respond_to.send(Err(FrameworkError::IdSpaceExhausted));
                        continue;
                    };
                    let id = T::Id::from(self.next_id);
                    self.next_id = following;

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), item.clone());
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut staged = current.clone();
                    match staged.on_update(update, &context).await {
                        Ok(()) => {
                            self.store.insert(id.clone(), staged.clone());
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(staged));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
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
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut staged = current.clone();
                    let result = match staged.handle_action(action, &context).await {
                        Ok(result) => {
                            self.store.insert(id.clone(), staged);
                            info!(entity_type, %id, "Action ok");
                            Ok(result)
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            Err(FrameworkError::EntityError(Box::new(e)))
                        }
                    };
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
