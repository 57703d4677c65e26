//! # DocumentEntity Trait
//!
//! The contract every document type (Post, Product, ...) implements so that a generic
//! [`CollectionActor`](crate::framework::CollectionActor) can store, query and mutate it.
//!
//! Associated types keep each collection's payloads apart: a `PostCreate` can only be
//! sent to the posts actor, a `ProductAction` only to the products actor.
//!
//! # Provided Methods (Hooks)
//! [`DocumentEntity::on_create`], [`DocumentEntity::on_delete`],
//! [`DocumentEntity::unique_key`] and [`DocumentEntity::is_draft`] have defaults.
//! Override them when the collection needs extra validation, a unique field or drafts.

use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any document type must implement to be managed by a `CollectionActor`.
///
/// Documents must be `Serialize`: where clauses and sorting are evaluated against the
/// document's JSON form, the same shape the HTTP API returns.
///
/// Hooks return `Result<_, String>`. The actor reports an `Err` as
/// [`StoreError::Invalid`](crate::framework::StoreError::Invalid) and leaves the stored
/// document untouched.
pub trait DocumentEntity: Clone + Debug + Serialize + Send + Sync + 'static {
    /// Collection slug, used in logs and error messages.
    const COLLECTION: &'static str;

    /// The unique identifier for this document.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new document.
    type CreateParams: Send + Sync + Debug;

    /// The data required to update an existing document.
    type UpdateParams: Send + Sync + Debug;

    /// Collection-specific operations executed inside the actor (e.g. `ToggleFeatured`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Construct the full document from the generated ID and the payload.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    /// Called after construction, before the document is inserted.
    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Apply an update payload.
    fn on_update(&mut self, update: Self::UpdateParams) -> Result<(), String>;

    /// Called immediately before the document is removed.
    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }

    /// Handle a collection-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;

    /// Value that must be unique across the collection (e.g. the slug).
    fn unique_key(&self) -> Option<&str> {
        None
    }

    /// Drafts are hidden from `find`/`count` unless the query asks for them.
    fn is_draft(&self) -> bool {
        false
    }
}
