//! DocumentEntity trait implementation for the Post document type.
//!
//! The store enforces post invariants here: non-blank title/slug/content/author, a
//! slug without whitespace, `readTime >= 1`, and a `publishedDate` for every
//! published post. Drafts are hidden from queries that do not ask for drafts.

use super::actions::{PostAction, PostActionResult};
use crate::framework::DocumentEntity;
use crate::model::{Post, PostCreate, PostStatus, PostUpdate};
use chrono::Utc;

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}

fn validate_slug(slug: &str) -> Result<(), String> {
    require_text("slug", slug)?;
    if slug.chars().any(char::is_whitespace) {
        return Err(format!("slug '{slug}' must not contain whitespace"));
    }
    Ok(())
}

fn validate_read_time(read_time: u32) -> Result<u32, String> {
    if read_time == 0 {
        return Err("readTime must be at least 1".to_string());
    }
    Ok(read_time)
}

impl Post {
    fn set_status(&mut self, status: PostStatus) {
        self.status = status;
        if status == PostStatus::Published && self.published_date.is_none() {
            self.published_date = Some(Utc::now());
        }
    }
}

impl DocumentEntity for Post {
    const COLLECTION: &'static str = "posts";

    type Id = String;
    type CreateParams = PostCreate;
    type UpdateParams = PostUpdate;
    type Action = PostAction;
    type ActionResult = PostActionResult;

    fn from_create_params(id: String, params: PostCreate) -> Result<Self, String> {
        require_text("title", &params.title)?;
        validate_slug(&params.slug)?;
        require_text("content", &params.content)?;
        require_text("author", &params.author)?;
        let read_time = validate_read_time(params.read_time.unwrap_or(Post::DEFAULT_READ_TIME))?;

        let now = Utc::now();
        let mut post = Self {
            id,
            title: params.title,
            slug: params.slug,
            content: params.content,
            excerpt: params.excerpt.filter(|e| !e.trim().is_empty()),
            author: params.author,
            category: params.category,
            status: PostStatus::Draft,
            featured: params.featured,
            read_time,
            published_date: params.published_date,
            tags: params.tags,
            created_at: now,
            updated_at: now,
        };
        post.set_status(params.status);
        Ok(post)
    }

    /// Applies every present field, then re-checks the invariants.
    fn on_update(&mut self, update: PostUpdate) -> Result<(), String> {
        if let Some(title) = update.title {
            require_text("title", &title)?;
            self.title = title;
        }
        if let Some(slug) = update.slug {
            validate_slug(&slug)?;
            self.slug = slug;
        }
        if let Some(content) = update.content {
            require_text("content", &content)?;
            self.content = content;
        }
        if let Some(excerpt) = update.excerpt {
            self.excerpt = Some(excerpt).filter(|e| !e.trim().is_empty());
        }
        if let Some(author) = update.author {
            require_text("author", &author)?;
            self.author = author;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }
        if let Some(read_time) = update.read_time {
            self.read_time = validate_read_time(read_time)?;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(date) = update.published_date {
            self.published_date = Some(date);
        }
        if let Some(status) = update.status {
            self.set_status(status);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    fn handle_action(&mut self, action: PostAction) -> Result<PostActionResult, String> {
        let result = match action {
            PostAction::ToggleStatus => {
                self.set_status(self.status.toggled());
                PostActionResult::ToggleStatus(self.status)
            }
            PostAction::ToggleFeatured => {
                self.featured = !self.featured;
                PostActionResult::ToggleFeatured(self.featured)
            }
        };
        self.updated_at = Utc::now();
        Ok(result)
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn is_draft(&self) -> bool {
        self.status == PostStatus::Draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> PostCreate {
        PostCreate::new("Hello", "hello", "Body", "Ada")
    }

    #[test]
    fn defaults_on_create() {
        let post = Post::from_create_params("post_1".into(), create()).unwrap();
        assert_eq!(post.read_time, Post::DEFAULT_READ_TIME);
        assert_eq!(post.status, PostStatus::Draft);
        assert!(post.published_date.is_none());
        assert!(post.is_draft());
    }

    #[test]
    fn rejects_missing_fields_and_bad_values() {
        let mut blank_title = create();
        blank_title.title = "  ".into();
        assert_eq!(
            Post::from_create_params("p".into(), blank_title).unwrap_err(),
            "title is required"
        );

        let mut spaced_slug = create();
        spaced_slug.slug = "two words".into();
        assert!(Post::from_create_params("p".into(), spaced_slug).is_err());

        let mut zero_read = create();
        zero_read.read_time = Some(0);
        assert!(Post::from_create_params("p".into(), zero_read).is_err());
    }

    #[test]
    fn publishing_stamps_date_once() {
        let mut post = Post::from_create_params("p".into(), create()).unwrap();
        post.handle_action(PostAction::ToggleStatus).unwrap();
        let first = post.published_date.expect("stamped on publish");

        post.handle_action(PostAction::ToggleStatus).unwrap();
        post.handle_action(PostAction::ToggleStatus).unwrap();
        assert_eq!(post.published_date, Some(first));
        assert!(post.is_published());
    }

    #[test]
    fn toggles_are_involutions() {
        let original = Post::from_create_params("p".into(), create()).unwrap();
        let mut post = original.clone();
        for action in [PostAction::ToggleFeatured, PostAction::ToggleStatus] {
            post.handle_action(action.clone()).unwrap();
            post.handle_action(action).unwrap();
        }
        assert_eq!(post.featured, original.featured);
        assert_eq!(post.status, original.status);
    }
}
