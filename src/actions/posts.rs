//! Mutation actions for posts.

use super::{has_text, missing_fields, settle, ActionResult};
use crate::app::AppState;
use crate::clients::CollectionApi;
use crate::error::AppError;
use crate::model::{Post, PostCategory, PostCreate, PostStatus, PostUpdate};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

/// Cached paths that show posts.
pub const POST_PATHS: [&str; 3] = ["/next", "/next/posts", "/next/server-functions"];

/// Untrusted input for creating a post. Required: `title`, `slug`, `content`, `author`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostInput {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<PostCategory>,
    pub status: Option<PostStatus>,
    pub featured: Option<bool>,
    pub read_time: Option<u32>,
    pub published_date: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
}

impl PostInput {
    /// `"Missing required fields: ..."` when any required field is absent or blank.
    pub fn missing_required(&self) -> Option<String> {
        missing_fields(&[
            ("title", has_text(&self.title)),
            ("slug", has_text(&self.slug)),
            ("content", has_text(&self.content)),
            ("author", has_text(&self.author)),
        ])
    }

    pub fn into_create(self) -> PostCreate {
        let mut create = PostCreate::new(
            self.title.unwrap_or_default(),
            self.slug.unwrap_or_default(),
            self.content.unwrap_or_default(),
            self.author.unwrap_or_default(),
        );
        create.excerpt = self.excerpt;
        create.category = self.category.unwrap_or_default();
        create.status = self.status.unwrap_or_default();
        create.featured = self.featured.unwrap_or(false);
        create.read_time = self.read_time;
        create.published_date = self.published_date;
        create.tags = self.tags.unwrap_or_default();
        create
    }
}

fn require_id(id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        return Err("Post ID is required".to_string());
    }
    Ok(())
}

pub async fn create_post(state: &AppState, input: PostInput) -> ActionResult<Post> {
    if let Some(missing) = input.missing_required() {
        return ActionResult::failure(missing);
    }
    let result = async {
        let api = state.local_api().await?;
        Ok::<_, AppError>(api.posts.create_post(input.into_create()).await?)
    }
    .await;
    settle(state, &POST_PATHS, result, "Post created successfully").await
}

pub async fn update_post(state: &AppState, id: &str, update: PostUpdate) -> ActionResult<Post> {
    if let Err(e) = require_id(id) {
        return ActionResult::failure(e);
    }
    let result = async {
        let api = state.local_api().await?;
        Ok::<_, AppError>(api.posts.update_post(id.to_string(), update).await?)
    }
    .await;
    settle(state, &POST_PATHS, result, "Post updated successfully").await
}

pub async fn delete_post(state: &AppState, id: &str) -> ActionResult<Post> {
    if let Err(e) = require_id(id) {
        return ActionResult::failure(e);
    }
    let result = async {
        let api = state.local_api().await?;
        Ok::<_, AppError>(api.posts.delete(id.to_string()).await?)
    }
    .await;
    settle(state, &POST_PATHS, result, "Post deleted successfully").await
}

/// Draft ⇄ published. The flip happens inside the store, so concurrent toggles
/// never lose an update.
pub async fn toggle_post_status(state: &AppState, id: &str) -> ActionResult<Post> {
    if let Err(e) = require_id(id) {
        return ActionResult::failure(e);
    }
    let result = async {
        let api = state.local_api().await?;
        Ok::<_, AppError>(api.posts.toggle_status(id.to_string()).await?)
    }
    .await;
    let message = match &result {
        Ok(post) if post.is_published() => "Post published",
        _ => "Post moved to drafts",
    };
    settle(state, &POST_PATHS, result, message).await
}

pub async fn toggle_post_featured(state: &AppState, id: &str) -> ActionResult<Post> {
    if let Err(e) = require_id(id) {
        return ActionResult::failure(e);
    }
    let result = async {
        let api = state.local_api().await?;
        Ok::<_, AppError>(api.posts.toggle_featured(id.to_string()).await?)
    }
    .await;
    let message = match &result {
        Ok(post) if post.featured => "Post featured",
        _ => "Post unfeatured",
    };
    settle(state, &POST_PATHS, result, message).await
}

/// Applies `update` to each ID in order, one write per ID.
///
/// The first failure stops the loop. Writes already made stay committed; the
/// failure result names how many there were and carries them in `data`.
pub async fn bulk_update_posts(
    state: &AppState,
    ids: &[String],
    update: PostUpdate,
) -> ActionResult<Vec<Post>> {
    if ids.is_empty() {
        return ActionResult::failure("No post IDs provided");
    }
    let api = match state.local_api().await {
        Ok(api) => api,
        Err(e) => return ActionResult::from_error(e),
    };

    let mut committed = Vec::with_capacity(ids.len());
    for id in ids {
        match api.posts.update_post(id.clone(), update.clone()).await {
            Ok(post) => committed.push(post),
            Err(e) => {
                let reason = ActionResult::<()>::from_error(e).error.unwrap_or_default();
                if !committed.is_empty() {
                    state.views.invalidate(&POST_PATHS).await;
                }
                info!(committed = committed.len(), total = ids.len(), %id, "Bulk update stopped");
                return ActionResult {
                    success: false,
                    message: None,
                    error: Some(format!(
                        "Updated {} of {} posts before failing on {}: {}",
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

    let message = format!("Updated {} posts", committed.len());
    settle(state, &POST_PATHS, Ok(committed), message).await
}
