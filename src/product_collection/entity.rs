//! DocumentEntity trait implementation for the Product document type.
//!
//! Includes the stock/featured toggles and inventory actions.

use super::actions::{ProductAction, ProductActionResult};
use crate::framework::DocumentEntity;
use crate::model::{Product, ProductCreate, ProductUpdate};
use chrono::Utc;

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<f64, String> {
    if !price.is_finite() || price < 0.0 {
        return Err(format!("price must be a non-negative number, got {price}"));
    }
    Ok(price)
}

impl DocumentEntity for Product {
    const COLLECTION: &'static str = "products";

    type Id = String;
    type CreateParams = ProductCreate;
    type UpdateParams = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, String> {
        require_text("name", &params.name)?;
        require_text("slug", &params.slug)?;
        if params.slug.chars().any(char::is_whitespace) {
            return Err(format!("slug '{}' must not contain whitespace", params.slug));
        }
        let price = validate_price(params.price)?;

        let now = Utc::now();
        Ok(Self {
            id,
            name: params.name,
            slug: params.slug,
            description: params.description,
            price,
            category: params.category,
            in_stock: params.in_stock,
            featured: params.featured,
            inventory: params.inventory,
            created_at: now,
            updated_at: now,
        })
    }

    /// Handles updates to the Product document.
    fn on_update(&mut self, update: ProductUpdate) -> Result<(), String> {
        if let Some(name) = update.name {
            require_text("name", &name)?;
            self.name = name;
        }
        if let Some(slug) = update.slug {
            require_text("slug", &slug)?;
            if slug.chars().any(char::is_whitespace) {
                return Err(format!("slug '{slug}' must not contain whitespace"));
            }
            self.slug = slug;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = validate_price(price)?;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(in_stock) = update.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }
        if let Some(inventory) = update.inventory {
            self.inventory = inventory;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, String> {
        let result = match action {
            ProductAction::ToggleStock => {
                self.in_stock = !self.in_stock;
                ProductActionResult::ToggleStock(self.in_stock)
            }
            ProductAction::ToggleFeatured => {
                self.featured = !self.featured;
                ProductActionResult::ToggleFeatured(self.featured)
            }
            ProductAction::SetInventory(inventory) => {
                self.inventory = inventory;
                ProductActionResult::Inventory(self.inventory)
            }
            ProductAction::AdjustInventory(delta) => {
                let next = i64::from(self.inventory) + delta;
                self.inventory = u32::try_from(next).map_err(|_| {
                    format!(
                        "Insufficient inventory: have {}, adjustment {}",
                        self.inventory, delta
                    )
                })?;
                ProductActionResult::Inventory(self.inventory)
            }
        };
        self.updated_at = Utc::now();
        Ok(result)
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.slug)
    }
}
