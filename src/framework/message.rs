//! # Collection Messages
//!
//! Requests sent from a [`CollectionClient`](crate::framework::CollectionClient) to its
//! [`CollectionActor`](crate::framework::CollectionActor).

use crate::framework::entity::DocumentEntity;
use crate::framework::error::StoreError;
use crate::framework::page::PaginatedDocs;
use crate::framework::query::{FindArgs, Where};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by collection actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Operations a collection understands.
///
/// The variants mirror the store's data-access API: `create`, `findByID` (`Get`),
/// `find`, `count`, `update` and `delete`. `Action` runs a collection-specific
/// read-modify-write inside the actor so it cannot interleave with other writes.
#[derive(Debug)]
pub enum CollectionRequest<T: DocumentEntity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Find {
        args: FindArgs,
        respond_to: Response<PaginatedDocs<T>>,
    },
    Count {
        filter: Where,
        draft: bool,
        respond_to: Response<u64>,
    },
    Update {
        id: T::Id,
        update: T::UpdateParams,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<(T::ActionResult, T)>,
    },
}
