use crate::clients::collection_api::CollectionApi;
use crate::framework::{CollectionClient, FindArgs, PaginatedDocs, Sort, StoreError, Where};
use crate::model::{Post, PostCreate, PostStatus, PostUpdate};
use crate::post_collection::{PostAction, PostError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the posts collection.
#[derive(Clone)]
pub struct PostClient {
    inner: CollectionClient<Post>,
}

impl PostClient {
    pub fn new(inner: CollectionClient<Post>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CollectionApi<Post> for PostClient {
    type Error = PostError;

    fn inner(&self) -> &CollectionClient<Post> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::NotFound(id) => PostError::NotFound(id),
            StoreError::Invalid(msg) => PostError::Validation(msg),
            StoreError::Conflict(msg) => PostError::Conflict(msg),
            other => PostError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl PostClient {
    #[instrument(skip(self, post), fields(slug = %post.slug))]
    pub async fn create_post(&self, post: PostCreate) -> Result<Post, PostError> {
        debug!("Sending request");
        self.inner.create(post).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, update))]
    pub async fn update_post(&self, id: String, update: PostUpdate) -> Result<Post, PostError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Newest-first page of posts; drafts only when `draft` is set.
    pub async fn paginate(
        &self,
        page: u32,
        limit: u32,
        draft: bool,
    ) -> Result<PaginatedDocs<Post>, PostError> {
        let args = FindArgs::new()
            .sort(Some(Sort::desc("createdAt")))
            .page(page)
            .limit(limit)
            .draft(draft);
        self.find(args).await
    }

    pub async fn count_published(&self) -> Result<u64, PostError> {
        self.count(Where::equals("status", PostStatus::Published.as_str()), false)
            .await
    }

    pub async fn find_featured(&self, limit: u32, draft: bool) -> Result<Vec<Post>, PostError> {
        let args = FindArgs::new()
            .filter(Where::And(vec![Where::equals("featured", true)]))
            .sort(Some(Sort::desc("createdAt")))
            .limit(limit)
            .draft(draft);
        Ok(self.find(args).await?.docs)
    }

    /// Flips draft/published inside the store; returns the updated post.
    #[instrument(skip(self))]
    pub async fn toggle_status(&self, id: String) -> Result<Post, PostError> {
        debug!("Sending request");
        let (_, post) = self
            .inner
            .perform_action(id, PostAction::ToggleStatus)
            .await
            .map_err(Self::map_error)?;
        Ok(post)
    }

    #[instrument(skip(self))]
    pub async fn toggle_featured(&self, id: String) -> Result<Post, PostError> {
        debug!("Sending request");
        let (_, post) = self
            .inner
            .perform_action(id, PostAction::ToggleFeatured)
            .await
            .map_err(Self::map_error)?;
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::entity::DocumentEntity;
    use crate::framework::mock::{create_mock_client, expect_action, expect_find, MockCollection};
    use crate::post_collection::PostActionResult;

    fn post(slug: &str) -> Post {
        Post::from_create_params("post_1".into(), PostCreate::new("T", slug, "C", "A")).unwrap()
    }

    #[tokio::test]
    async fn find_by_slug_queries_slug_with_limit_one() {
        let (client, mut receiver) = create_mock_client::<Post>(10);
        let client = PostClient::new(client);

        let lookup = tokio::spawn(async move { client.find_by_slug("hello", true).await });

        let (args, respond_to) = expect_find(&mut receiver).await.expect("find request");
        assert_eq!(args.filter, Where::And(vec![Where::equals("slug", "hello")]));
        assert_eq!(args.limit, 1);
        assert!(args.draft);
        respond_to
            .send(Ok(PaginatedDocs::from_matches(vec![post("hello")], 1, 1)))
            .unwrap();

        let found = lookup.await.unwrap().unwrap();
        assert_eq!(found.map(|p| p.slug), Some("hello".to_string()));
    }

    #[tokio::test]
    async fn toggle_status_sends_store_action() {
        let (client, mut receiver) = create_mock_client::<Post>(10);
        let client = PostClient::new(client);

        let toggle = tokio::spawn(async move { client.toggle_status("post_1".into()).await });

        let (id, action, respond_to) = expect_action(&mut receiver).await.expect("action");
        assert_eq!(id, "post_1");
        assert_eq!(action, PostAction::ToggleStatus);
        let mut toggled = post("hello");
        toggled.status = PostStatus::Published;
        respond_to
            .send(Ok((PostActionResult::ToggleStatus(PostStatus::Published), toggled)))
            .unwrap();

        assert!(toggle.await.unwrap().unwrap().is_published());
    }

    #[tokio::test]
    async fn store_errors_map_to_post_errors() {
        let mock = MockCollection::<Post>::new();
        mock.expect_update()
            .return_err(StoreError::NotFound("post_9".into()));
        mock.expect_create()
            .return_err(StoreError::Conflict("slug taken".into()));
        mock.expect_get().return_err(StoreError::ActorClosed);
        let client = PostClient::new(mock.client());

        assert_eq!(
            client
                .update_post("post_9".into(), PostUpdate::default())
                .await,
            Err(PostError::NotFound("post_9".into()))
        );
        assert_eq!(
            client.create_post(PostCreate::new("T", "s", "C", "A")).await,
            Err(PostError::Conflict("slug taken".into()))
        );
        assert!(matches!(
            client.get("post_1".into()).await,
            Err(PostError::ActorCommunicationError(_))
        ));
        mock.verify();
    }
}
