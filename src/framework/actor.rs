//! # Generic Actor Server
//!
//! The `ResourceActor` owns the store for one entity type and processes every request
//! sequentially, so no request ever observes another one half-applied.

use crate::framework::client::ResourceClient;
use crate::framework::entity::{ActorEntity, Store};
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This is the "server" half of the actor: it owns the store and the receiving end of the
/// channel. Each actor handles one message at a time, so the store needs no `Mutex` or `RwLock`.
/// Exclusive ownership inside the task is what keeps it consistent.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a Tokio task.
///
/// # Operations
///
/// * **Create**: allocates the next `u32` ID, builds the entity with `from_create_params`,
///   runs `on_create`, then inserts it.
/// * **Get**: returns a clone of the entity, or `None`.
/// * **Update**: runs `on_update` on the stored entity and returns the new state.
/// * **Delete**: runs `on_delete`, then removes the entity.
/// * **Action**: runs `handle_action` on the stored entity.
/// * **Query**: runs `handle_query` against the whole store, read-only.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Store<T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full, client calls wait
    /// for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Short type name, e.g. "ProductLedger" instead of the full module path
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    // Hooks mutate a copy so a rejected update leaves the stored entity untouched
                    let mut candidate = item.clone();
                    match candidate.on_update(update, &context).await {
                        Ok(()) => {
                            *item = candidate;
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(item.clone()));
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
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Query { query, respond_to } => {
                    debug!(entity_type, ?query, "Query");
                    let result = T::handle_query(&self.store, query, &context)
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    if let Err(e) = &result {
                        warn!(entity_type, error = %e, "Query failed");
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    // --- Test Entity ---

    #[derive(Clone, Debug, PartialEq)]
    struct Bin {
        id: u32,
        label: String,
        count: u32,
    }

    #[derive(Debug)]
    struct BinCreate {
        label: String,
    }

    #[derive(Debug)]
    struct BinUpdate {
        label: String,
    }

    #[derive(Debug)]
    enum BinAction {
        Take(u32),
        Put(u32),
    }

    #[derive(Debug)]
    enum BinQuery {
        TotalCount,
    }

    #[derive(Debug, thiserror::Error)]
    enum BinError {
        #[error("bin empty")]
        Empty,
        #[error("label required")]
        MissingLabel,
    }

    #[async_trait]
    impl ActorEntity for Bin {
        type Id = u32;
        type Create = BinCreate;
        type Update = BinUpdate;
        type Action = BinAction;
        type ActionResult = u32;
        type Query = BinQuery;
        type QueryResult = u32;
        type Context = ();
        type Error = BinError;

        fn from_create_params(id: u32, params: BinCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                label: params.label,
                count: 0,
            })
        }

        async fn on_update(&mut self, update: BinUpdate, _ctx: &()) -> Result<(), Self::Error> {
            self.label = update.label;
            if self.label.is_empty() {
                return Err(BinError::MissingLabel);
            }
            Ok(())
        }

        async fn handle_action(&mut self, action: BinAction, _ctx: &()) -> Result<u32, Self::Error> {
            match action {
                BinAction::Take(n) if n > self.count => Err(BinError::Empty),
                BinAction::Take(n) => {
                    self.count -= n;
                    Ok(self.count)
                }
                BinAction::Put(n) => {
                    self.count += n;
                    Ok(self.count)
                }
            }
        }

        fn handle_query(store: &Store<Self>, query: BinQuery, _ctx: &()) -> Result<u32, Self::Error> {
            match query {
                BinQuery::TotalCount => Ok(store.values().map(|b| b.count).sum()),
            }
        }
    }

    #[tokio::test]
    async fn test_actor_full_lifecycle() {
        let (actor, client) = ResourceActor::<Bin>::new(10);
        let handle = tokio::spawn(actor.run(()));

        let a = client.create(BinCreate { label: "a".into() }).await.unwrap();
        let b = client.create(BinCreate { label: "b".into() }).await.unwrap();
        assert_eq!((a, b), (1, 2));

        assert_eq!(client.perform_action(a, BinAction::Put(5)).await.unwrap(), 5);
        assert_eq!(client.perform_action(b, BinAction::Put(2)).await.unwrap(), 2);
        assert_eq!(client.query(BinQuery::TotalCount).await.unwrap(), 7);

        // A failed action leaves state untouched
        let err = client.perform_action(b, BinAction::Take(3)).await.unwrap_err();
        assert!(matches!(err, FrameworkError::EntityError(_)));
        assert_eq!(client.get(b).await.unwrap().unwrap().count, 2);

        let renamed = client.update(a, BinUpdate { label: "shelf".into() }).await.unwrap();
        assert_eq!(renamed.label, "shelf");

        client.delete(a).await.unwrap();
        assert!(client.get(a).await.unwrap().is_none());
        assert_eq!(client.query(BinQuery::TotalCount).await.unwrap(), 2);

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_update_keeps_previous_state() {
        let (actor, client) = ResourceActor::<Bin>::new(10);
        tokio::spawn(actor.run(()));

        let id = client.create(BinCreate { label: "keep".into() }).await.unwrap();
        let result = client.update(id, BinUpdate { label: String::new() }).await;
        assert!(result.is_err());
        assert_eq!(client.get(id).await.unwrap().unwrap().label, "keep");
    }

    #[tokio::test]
    async fn test_missing_entity_reports_not_found() {
        let (actor, client) = ResourceActor::<Bin>::new(10);
        tokio::spawn(actor.run(()));

        let err = client.perform_action(42, BinAction::Put(1)).await.unwrap_err();
        assert!(matches!(err, FrameworkError::NotFound(id) if id == "42"));
    }
}
