//! Blog posts.
//!
//! See [`crate::post_collection::entity`] for how posts are validated, updated and
//! toggled by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    #[default]
    Technology,
    Design,
    Business,
    Lifestyle,
    Tutorial,
}

impl PostCategory {
    pub const ALL: [PostCategory; 5] = [
        PostCategory::Technology,
        PostCategory::Design,
        PostCategory::Business,
        PostCategory::Lifestyle,
        PostCategory::Tutorial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostCategory::Technology => "technology",
            PostCategory::Design => "design",
            PostCategory::Business => "business",
            PostCategory::Lifestyle => "lifestyle",
            PostCategory::Tutorial => "tutorial",
        }
    }
}

impl Display for PostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown post category: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PostStatus::Draft => PostStatus::Published,
            PostStatus::Published => PostStatus::Draft,
        }
    }
}

impl Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(format!("Unknown post status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub author: String,
    pub category: PostCategory,
    pub status: PostStatus,
    pub featured: bool,
    pub read_time: u32,
    pub published_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub const DEFAULT_READ_TIME: u32 = 5;

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Payload for creating a post. Required fields are positional in [`PostCreate::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct PostCreate {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub author: String,
    pub excerpt: Option<String>,
    pub category: PostCategory,
    pub status: PostStatus,
    pub featured: bool,
    pub read_time: Option<u32>,
    pub published_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl PostCreate {
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            content: content.into(),
            author: author.into(),
            excerpt: None,
            category: PostCategory::default(),
            status: PostStatus::default(),
            featured: false,
            read_time: None,
            published_date: None,
            tags: Vec::new(),
        }
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub category: Option<PostCategory>,
    pub status: Option<PostStatus>,
    pub featured: Option<bool>,
    pub read_time: Option<u32>,
    pub published_date: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
}
