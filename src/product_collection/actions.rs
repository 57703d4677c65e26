//! Custom actions for the products collection.
//!
//! These are the stock and inventory operations the demo UI exposes as one-click
//! buttons. Each runs as a single message inside the collection actor.

/// Product operations beyond plain updates.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Flips the `inStock` flag.
    ToggleStock,
    /// Flips the `featured` flag.
    ToggleFeatured,
    /// Replaces the inventory count.
    SetInventory(u32),
    /// Adds a signed delta to the inventory.
    ///
    /// # Errors
    /// Fails if the result would drop below zero.
    AdjustInventory(i64),
}

/// Results from ProductActions.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// `inStock` after the toggle.
    ToggleStock(bool),
    /// `featured` after the toggle.
    ToggleFeatured(bool),
    /// Inventory after `SetInventory` or `AdjustInventory`.
    Inventory(u32),
}
