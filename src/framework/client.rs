//! # Collection Client
//!
//! The cloneable, type-safe handle for talking to a [`CollectionActor`](crate::framework::CollectionActor).

use crate::framework::entity::DocumentEntity;
use crate::framework::error::StoreError;
use crate::framework::message::CollectionRequest;
use crate::framework::page::PaginatedDocs;
use crate::framework::query::{FindArgs, Where};
use tokio::sync::{mpsc, oneshot};

/// Forwards requests over the actor's mailbox and awaits the one-shot reply.
///
/// Holds only a sender, so cloning is cheap. Once every clone is dropped the actor
/// shuts down.
pub struct CollectionClient<T: DocumentEntity> {
    sender: mpsc::Sender<CollectionRequest<T>>,
}

impl<T: DocumentEntity> Clone for CollectionClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: DocumentEntity> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<CollectionRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> CollectionRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, StoreError> {
        self.request(|respond_to| CollectionRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| CollectionRequest::Get { id, respond_to })
            .await
    }

    pub async fn find(&self, args: FindArgs) -> Result<PaginatedDocs<T>, StoreError> {
        self.request(|respond_to| CollectionRequest::Find { args, respond_to })
            .await
    }

    pub async fn count(&self, filter: Where, draft: bool) -> Result<u64, StoreError> {
        self.request(|respond_to| CollectionRequest::Count {
            filter,
            draft,
            respond_to,
        })
        .await
    }

    pub async fn update(&self, id: T::Id, update: T::UpdateParams) -> Result<T, StoreError> {
        self.request(|respond_to| CollectionRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<T, StoreError> {
        self.request(|respond_to| CollectionRequest::Delete { id, respond_to })
            .await
    }

    /// Runs a collection-specific action; returns its result and the document after it.
    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<(T::ActionResult, T), StoreError> {
        self.request(|respond_to| CollectionRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
