use crate::framework::{
    CollectionClient, DocumentEntity, FindArgs, PaginatedDocs, StoreError, Where,
};
use async_trait::async_trait;

/// Trait for collection-specific clients to inherit the standard read/delete operations.
///
/// Implementors supply the inner [`CollectionClient`] and the mapping from
/// [`StoreError`] to their own error type; everything else is provided.
#[async_trait]
pub trait CollectionApi<T: DocumentEntity>: Send + Sync {
    /// The collection-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic CollectionClient.
    fn inner(&self) -> &CollectionClient<T>;

    /// Map store errors to the collection error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a document by ID (`findByID`).
    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete a document by ID, returning it.
    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn delete(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find(&self, args: FindArgs) -> Result<PaginatedDocs<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find(args).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn count(&self, filter: Where, draft: bool) -> Result<u64, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().count(filter, draft).await.map_err(Self::map_error)
    }

    /// First document whose `slug` equals `slug`.
    async fn find_by_slug(&self, slug: &str, draft: bool) -> Result<Option<T>, Self::Error> {
        let args = FindArgs::new()
            .filter(Where::And(vec![Where::equals("slug", slug)]))
            .limit(1)
            .draft(draft);
        let page = self.find(args).await?;
        Ok(page.docs.into_iter().next())
    }
}
