use crate::clients::collection_api::CollectionApi;
use crate::framework::{CollectionClient, FindArgs, PaginatedDocs, Sort, StoreError, Where};
use crate::model::{Product, ProductCreate, ProductUpdate};
use crate::product_collection::{ProductAction, ProductError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the products collection.
#[derive(Clone)]
pub struct ProductClient {
    inner: CollectionClient<Product>,
}

impl ProductClient {
    pub fn new(inner: CollectionClient<Product>) -> Self {
        Self { inner }
    }

    async fn act(&self, id: String, action: ProductAction) -> Result<Product, ProductError> {
        let (_, product) = self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?;
        Ok(product)
    }
}

#[async_trait]
impl CollectionApi<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &CollectionClient<Product> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::NotFound(id) => ProductError::NotFound(id),
            StoreError::Invalid(msg) => ProductError::Validation(msg),
            StoreError::Conflict(msg) => ProductError::Conflict(msg),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    #[instrument(skip(self, product), fields(slug = %product.slug))]
    pub async fn create_product(&self, product: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(product).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        id: String,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    pub async fn paginate(&self, page: u32, limit: u32) -> Result<PaginatedDocs<Product>, ProductError> {
        let args = FindArgs::new()
            .sort(Some(Sort::desc("createdAt")))
            .page(page)
            .limit(limit);
        self.find(args).await
    }

    pub async fn count_in_stock(&self) -> Result<u64, ProductError> {
        self.count(Where::equals("inStock", true), false).await
    }

    pub async fn find_featured(&self, limit: u32) -> Result<Vec<Product>, ProductError> {
        let args = FindArgs::new()
            .filter(Where::And(vec![Where::equals("featured", true)]))
            .sort(Some(Sort::desc("createdAt")))
            .limit(limit);
        Ok(self.find(args).await?.docs)
    }

    #[instrument(skip(self))]
    pub async fn toggle_stock(&self, id: String) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.act(id, ProductAction::ToggleStock).await
    }

    #[instrument(skip(self))]
    pub async fn toggle_featured(&self, id: String) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.act(id, ProductAction::ToggleFeatured).await
    }

    #[instrument(skip(self))]
    pub async fn set_inventory(&self, id: String, inventory: u32) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.act(id, ProductAction::SetInventory(inventory)).await
    }

    /// Adds `delta` to the inventory; fails rather than going below zero.
    #[instrument(skip(self))]
    pub async fn adjust_inventory(&self, id: String, delta: i64) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.act(id, ProductAction::AdjustInventory(delta)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::entity::DocumentEntity;
    use crate::framework::mock::MockCollection;
    use crate::product_collection::ProductActionResult;

    fn product() -> Product {
        Product::from_create_params("product_1".into(), ProductCreate::new("W", "w", "D", 2.0))
            .unwrap()
    }

    #[tokio::test]
    async fn set_inventory_returns_updated_product() {
        let mock = MockCollection::<Product>::new();
        let mut stocked = product();
        stocked.inventory = 12;
        mock.expect_action()
            .return_ok((ProductActionResult::Inventory(12), stocked));
        let client = ProductClient::new(mock.client());

        let updated = client.set_inventory("product_1".into(), 12).await.unwrap();
        assert_eq!(updated.inventory, 12);
        mock.verify();
    }

    #[tokio::test]
    async fn invalid_adjustment_is_a_validation_error() {
        let mock = MockCollection::<Product>::new();
        mock.expect_action()
            .return_err(StoreError::Invalid("Insufficient inventory".into()));
        mock.expect_count().return_ok(3);
        let client = ProductClient::new(mock.client());

        assert_eq!(
            client.adjust_inventory("product_1".into(), -5).await,
            Err(ProductError::Validation("Insufficient inventory".into()))
        );
        assert_eq!(client.count_in_stock().await, Ok(3));
        mock.verify();
    }
}
