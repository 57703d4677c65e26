//! Mutation actions for products.

use super::{has_text, missing_fields, settle, ActionResult};
use crate::app::AppState;
use crate::clients::CollectionApi;
use crate::error::AppError;
use crate::model::{Product, ProductCategory, ProductCreate, ProductUpdate};
use serde::Deserialize;
use tracing::info;

/// Cached paths that show products.
pub const PRODUCT_PATHS: [&str; 3] = ["/next", "/next/products", "/next/server-functions"];

/// Untrusted input for creating a product. Required: `name`, `slug`, `description`, `price`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<ProductCategory>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
    pub inventory: Option<u32>,
}

impl ProductInput {
    pub fn missing_required(&self) -> Option<String> {
        missing_fields(&[
            ("name", has_text(&self.name)),
            ("slug", has_text(&self.slug)),
            ("description", has_text(&self.description)),
            ("price", self.price.is_some()),
        ])
    }

    pub fn into_create(self) -> ProductCreate {
        let mut create = ProductCreate::new(
            self.name.unwrap_or_default(),
            self.slug.unwrap_or_default(),
            self.description.unwrap_or_default(),
            self.price.unwrap_or_default(),
        );
        create.category = self.category.unwrap_or_default();
        create.in_stock = self.in_stock.unwrap_or(true);
        create.featured = self.featured.unwrap_or(false);
        create.inventory = self.inventory.unwrap_or(0);
        create
    }
}

fn require_id(id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        return Err("Product ID is required".to_string());
    }
    Ok(())
}

pub async fn create_product(state: &AppState, input: ProductInput) -> ActionResult<Product> {
    if let Some(missing) = input.missing_required() {
        return ActionResult::failure(missing);
    }
    let result = async {
        let api = state.local_api().await?;
        Ok::<_, AppError>(api.products.create_product(input.into_create()).await?)
    }
    .await;
    settle(state, &PRODUCT_PATHS, result, "Product created successfully").await
}

pub async fn update_product(
    state: &AppState,
    id: &str,
    update: ProductUpdate,
) -> ActionResult<Product> {
    if let Err(e) = require_id(id) {
        return ActionResult::failure(e);
    }
    let result = async {
        let api = state.local_api().await?;
        Ok::<_, AppError>(api.products.update_product(id.to_string(), update).await?)
    }
    .await;
    settle(state, &PRODUCT_PATHS, result, "Product updated successfully").await
}

pub async fn delete_product(state: &AppState, id: &str) -> ActionResult<Product> {
    if let Err(e) = require_id(id) {
        return ActionResult::failure(e);
    }
    let result = async {
        let api = state.local_api().await?;
        Ok::<_, AppError>(api.products.delete(id.to_string()).await?)
    }
    .await;
    settle(state, &PRODUCT_PATHS, result, "Product deleted successfully").await
}

pub async fn toggle_product_stock(state: &AppState, id: &str) -> ActionResult<Product> {
    if let Err(e) = require_id(id) {
        return ActionResult::failure(e);
    }
    let result = async {
        let api = state.local_api().await?;
        Ok::<_, AppError>(api.products.toggle_stock(id.to_string()).await?)
    }
    .await;
    let message = match &result {
        Ok(product) if product.in_stock => "Product marked in stock",
        _ => "Product marked out of stock",
    };
    settle(state, &PRODUCT_PATHS, result, message).await
}

pub async fn toggle_product_featured(state: &AppState, id: &str) -> ActionResult<Product> {
    if let Err(e) = require_id(id) {
        return ActionResult::failure(e);
    }
    let result = async {
        let api = state.local_api().await?;
        Ok::<_, AppError>(api.products.toggle_featured(id.to_string()).await?)
    }
    .await;
    let message = match &result {
        Ok(product) if product.featured => "Product featured",
        _ => "Product unfeatured",
    };
    settle(state, &PRODUCT_PATHS, result, message).await
}

pub async fn update_inventory(state: &AppState, id: &str, inventory: u32) -> ActionResult<Product> {
    if let Err(e) = require_id(id) {
        return ActionResult::failure(e);
    }
    let result = async {
        let api = state.local_api().await?;
        Ok::<_, AppError>(api.products.set_inventory(id.to_string(), inventory).await?)
    }
    .await;
    settle(state, &PRODUCT_PATHS, result, format!("Inventory set to {inventory}")).await
}

/// Applies `update` to each ID in order; see [`bulk_update_posts`](super::bulk_update_posts)
/// for the failure semantics.
pub async fn bulk_update_products(
    state: &AppState,
    ids: &[String],
    update: ProductUpdate,
) -> ActionResult<Vec<Product>> {
    if ids.is_empty() {
        return ActionResult::failure("No product IDs provided");
    }
    let api = match state.local_api().await {
        Ok(api) => api,
        Err(e) => return ActionResult::from_error(e),
    };

    let mut committed = Vec::with_capacity(ids.len());
    for id in ids {
        match api.products.update_product(id.clone(), update.clone()).await {
            Ok(product) => committed.push(product),
            Err(e) => {
                let reason = ActionResult::<()>::from_error(e).error.unwrap_or_default();
                if !committed.is_empty() {
                    state.views.invalidate(&PRODUCT_PATHS).await;
                }
                info!(committed = committed.len(), total = ids.len(), %id, "Bulk update stopped");
                return ActionResult {
                    success: false,
                    message: None,
                    error: Some(format!(
                        "Updated {} of {} products before failing on {}: {}",
                        committed.len(),
                        ids.len(),
                        id,
                        reason
                    )),
                    data: Some(committed),
                };
            }
        }
    }

    let message = format!("Updated {} products", committed.len());
    settle(state, &PRODUCT_PATHS, Ok(committed), message).await
}
