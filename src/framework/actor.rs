//! # Collection Actor
//!
//! The server half of a collection. It owns the documents and processes
//! [`CollectionRequest`]s one at a time, so no lock guards the map.

use crate::framework::client::CollectionClient;
use crate::framework::entity::DocumentEntity;
use crate::framework::error::StoreError;
use crate::framework::message::CollectionRequest;
use crate::framework::page::PaginatedDocs;
use crate::framework::query::{FindArgs, Where};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A document plus its insertion sequence number, used as the stable sort tie-break.
struct StoredDoc<T> {
    seq: u64,
    doc: T,
}

/// The generic actor that manages one collection of documents.
///
/// # Usage Pattern
///
/// 1. **Create**: `CollectionActor::new()` returns the actor and its client.
/// 2. **Run**: spawn `actor.run()` on the runtime.
/// 3. **Use**: clone the client wherever the collection is needed.
///
/// The actor stops when every client has been dropped.
///
/// # Operations
///
/// * **Create**: builds the document from the generated ID, runs `on_create`, rejects
///   a taken unique key with [`StoreError::Conflict`], inserts.
/// * **Get**: clone of the stored document, or `None`.
/// * **Find / Count**: evaluates the where clause against each document's JSON,
///   hiding drafts unless asked, then sorts and paginates.
/// * **Update / Action**: applies the hook to a copy and stores the copy only if the
///   hook succeeds and the unique key is still free.
/// * **Delete**: runs `on_delete`, removes and returns the document.
pub struct CollectionActor<T: DocumentEntity> {
    receiver: mpsc::Receiver<CollectionRequest<T>>,
    store: HashMap<T::Id, StoredDoc<T>>,
    next_seq: u64,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: DocumentEntity> CollectionActor<T> {
    /// Creates a collection actor and its client.
    ///
    /// `buffer_size` is the mailbox capacity; callers wait when it is full.
    /// `next_id_fn` generates the ID of each created document.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_seq: 1,
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, CollectionClient::new(sender))
    }

    /// Runs the event loop until the channel closes.
    pub async fn run(mut self) {
        let collection = T::COLLECTION;
        info!(collection, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Create { params, respond_to } => {
                    debug!(collection, ?params, "Create");
                    let _ = respond_to.send(self.create(params));
                }
                CollectionRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).map(|stored| stored.doc.clone());
                    debug!(collection, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                CollectionRequest::Find { args, respond_to } => {
                    let page = self.find(&args);
                    debug!(
                        collection,
                        filter = %args.filter.to_value(),
                        page = page.page,
                        total = page.total_docs,
                        "Find"
                    );
                    let _ = respond_to.send(Ok(page));
                }
                CollectionRequest::Count {
                    filter,
                    draft,
                    respond_to,
                } => {
                    let total = self.matching(&filter, draft).len() as u64;
                    debug!(collection, filter = %filter.to_value(), total, "Count");
                    let _ = respond_to.send(Ok(total));
                }
                CollectionRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(collection, %id, ?update, "Update");
                    let result = self.modify(&id, |doc| doc.on_update(update).map(|_| ()));
                    match &result {
                        Ok(_) => info!(collection, %id, "Updated"),
                        Err(e) => warn!(collection, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result.map(|(_, doc)| doc));
                }
                CollectionRequest::Delete { id, respond_to } => {
                    debug!(collection, %id, "Delete");
                    let _ = respond_to.send(self.delete(&id));
                }
                CollectionRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(collection, %id, ?action, "Action");
                    let result = self.modify(&id, |doc| doc.handle_action(action));
                    match &result {
                        Ok(_) => info!(collection, %id, "Action ok"),
                        Err(e) => warn!(collection, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(collection, size = self.store.len(), "Shutdown");
    }

    fn create(&mut self, params: T::CreateParams) -> Result<T, StoreError> {
        let collection = T::COLLECTION;
        let id = (self.next_id_fn)();

        let mut doc = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(collection, error = %e, "Create failed");
            StoreError::Invalid(e)
        })?;
        if let Err(e) = doc.on_create() {
            warn!(collection, error = %e, "on_create failed");
            return Err(StoreError::Invalid(e));
        }
        self.ensure_unique(&id, &doc)?;

        let seq = self.next_seq;
        self.next_seq += 1;
        self.store.insert(
            id.clone(),
            StoredDoc {
                seq,
                doc: doc.clone(),
            },
        );
        info!(collection, %id, size = self.store.len(), "Created");
        Ok(doc)
    }

    fn delete(&mut self, id: &T::Id) -> Result<T, StoreError> {
        let collection = T::COLLECTION;
        let Some(stored) = self.store.get(id) else {
            warn!(collection, %id, "Not found");
            return Err(StoreError::NotFound(id.to_string()));
        };
        if let Err(e) = stored.doc.on_delete() {
            warn!(collection, %id, error = %e, "on_delete failed");
            return Err(StoreError::Invalid(e));
        }
        let removed = self.store.remove(id).map(|stored| stored.doc);
        info!(collection, %id, size = self.store.len(), "Deleted");
        removed.ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Runs `apply` on a copy of the document and commits the copy on success.
    fn modify<R>(
        &mut self,
        id: &T::Id,
        apply: impl FnOnce(&mut T) -> Result<R, String>,
    ) -> Result<(R, T), StoreError> {
        let Some(stored) = self.store.get(id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        let mut draft = stored.doc.clone();
        let result = apply(&mut draft).map_err(StoreError::Invalid)?;
        self.ensure_unique(id, &draft)?;

        if let Some(stored) = self.store.get_mut(id) {
            stored.doc = draft.clone();
        }
        Ok((result, draft))
    }

    fn ensure_unique(&self, id: &T::Id, doc: &T) -> Result<(), StoreError> {
        let Some(key) = doc.unique_key() else {
            return Ok(());
        };
        let taken = self
            .store
            .iter()
            .any(|(other_id, stored)| other_id != id && stored.doc.unique_key() == Some(key));
        if taken {
            warn!(collection = T::COLLECTION, key, "Unique key taken");
            return Err(StoreError::Conflict(format!(
                "{} with slug '{}' already exists",
                T::COLLECTION,
                key
            )));
        }
        Ok(())
    }

    /// Documents matching `filter`, paired with their JSON form and sequence number.
    fn matching(&self, filter: &Where, draft: bool) -> Vec<(u64, Value, &T)> {
        self.store
            .values()
            .filter(|stored| draft || !stored.doc.is_draft())
            .filter_map(|stored| match serde_json::to_value(&stored.doc) {
                Ok(json) => Some((stored.seq, json, &stored.doc)),
                Err(e) => {
                    warn!(collection = T::COLLECTION, error = %e, "Skipping unserializable document");
                    None
                }
            })
            .filter(|(_, json, _)| filter.matches(json))
            .collect()
    }

    fn find(&self, args: &FindArgs) -> PaginatedDocs<T> {
        let mut matches = self.matching(&args.filter, args.draft);
        matches.sort_by(|(seq_a, a, _), (seq_b, b, _)| {
            let by_field = args
                .sort
                .as_ref()
                .map(|sort| sort.compare(a, b))
                .unwrap_or(std::cmp::Ordering::Equal);
            // Newest first when the field does not decide.
            by_field.then_with(|| seq_b.cmp(seq_a))
        });
        let docs = matches.into_iter().map(|(_, _, doc)| doc.clone()).collect();
        PaginatedDocs::from_matches(docs, args.page, args.limit)
    }
}
