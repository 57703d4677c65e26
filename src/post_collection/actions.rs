//! Custom actions for the posts collection.
//!
//! Actions run inside the collection actor, so a toggle reads and writes the post in
//! one step and concurrent toggles cannot overwrite each other.

use crate::model::PostStatus;

/// Post operations beyond plain updates.
#[derive(Debug, Clone, PartialEq)]
pub enum PostAction {
    /// Flips draft ⇄ published. The first publish stamps `publishedDate`.
    ToggleStatus,
    /// Flips the `featured` flag.
    ToggleFeatured,
}

/// Results from PostActions - variants match 1:1 with PostAction.
#[derive(Debug, Clone, PartialEq)]
pub enum PostActionResult {
    /// The status after the toggle.
    ToggleStatus(PostStatus),
    /// The featured flag after the toggle.
    ToggleFeatured(bool),
}
