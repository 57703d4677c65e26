//! Rendered-page cache keyed by request path.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Pages {
    html: HashMap<String, String>,
    /// Bumped by every invalidation.
    generation: u64,
}

/// HTML of previously rendered pages, shared by the page handlers and the mutation
/// actions that invalidate it.
#[derive(Clone, Default)]
pub struct ViewCache {
    pages: Arc<RwLock<Pages>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.pages.read().await.html.get(key).cloned()
    }

    /// Read before rendering and hand back to [`put`](Self::put).
    pub async fn generation(&self) -> u64 {
        self.pages.read().await.generation
    }

    /// Stores `html` unless an invalidation ran after `seen` was read, in which case
    /// the render may predate the write and is dropped.
    pub async fn put(&self, key: impl Into<String>, html: String, seen: u64) -> bool {
        let key = key.into();
        let mut pages = self.pages.write().await;
        if pages.generation != seen {
            debug!(%key, "Stale render not cached");
            return false;
        }
        pages.html.insert(key, html);
        true
    }

    /// Drops `path` and all of its query-string variants (`/next/posts?page=2`).
    pub async fn invalidate(&self, paths: &[&str]) {
        let mut pages = self.pages.write().await;
        pages.generation += 1;
        let before = pages.html.len();
        pages.html.retain(|key, _| {
            let bare = key.split_once('?').map_or(key.as_str(), |(p, _)| p);
            !paths.contains(&bare)
        });
        debug!(?paths, dropped = before - pages.html.len(), "Revalidated");
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.html.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalidate_drops_query_variants_only_for_listed_paths() {
        let cache = ViewCache::new();
        let seen = cache.generation().await;
        cache.put("/next", "index".into(), seen).await;
        cache.put("/next/posts", "p1".into(), seen).await;
        cache.put("/next/posts?page=2", "p2".into(), seen).await;
        cache.put("/next/products", "list".into(), seen).await;

        cache.invalidate(&["/next", "/next/posts"]).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("/next/products").await.as_deref(), Some("list"));
    }

    #[tokio::test]
    async fn render_started_before_an_invalidation_is_not_cached() {
        let cache = ViewCache::new();
        let seen = cache.generation().await;

        cache.invalidate(&["/next"]).await;

        assert!(!cache.put("/next", "stale".into(), seen).await);
        assert_eq!(cache.get("/next").await, None);

        let fresh = cache.generation().await;
        assert!(cache.put("/next", "fresh".into(), fresh).await);
        assert_eq!(cache.get("/next").await.as_deref(), Some("fresh"));
    }
}
