//! Server-rendered pages under `/next`.
//!
//! Pages query the Local API at render time. Outside draft mode the HTML is cached
//! per path in the [`ViewCache`](crate::cache::ViewCache) until an action revalidates
//! it; in draft mode the cache is neither read nor written.

pub mod demo;
pub mod layout;

use crate::app::AppState;
use crate::clients::CollectionApi;
use crate::error::AppError;
use crate::filters::{positive_or, DEFAULT_PAGE};
use crate::framework::Where;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use html_escape::encode_text as text;
use serde::Deserialize;
use std::future::Future;
use tracing::debug;

const POSTS_PER_PAGE: u32 = 6;
const PRODUCTS_PER_PAGE: u32 = 12;
const FEATURED_ON_INDEX: u32 = 3;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/next", get(index))
        .route("/next/posts", get(posts))
        .route("/next/posts/{slug}", get(post_detail))
        .route("/next/products", get(products))
        .route("/next/products/{slug}", get(product_detail))
        .route("/next/server-functions", get(demo::page))
        .route("/next/server-functions/posts", post(demo::create_post))
        .route("/next/server-functions/posts/bulk-publish", post(demo::bulk_publish))
        .route("/next/server-functions/posts/{id}/{op}", post(demo::post_op))
        .route("/next/server-functions/products", post(demo::create_product))
        .route(
            "/next/server-functions/products/{id}/inventory",
            post(demo::set_inventory),
        )
        .route("/next/server-functions/products/{id}/{op}", post(demo::product_op))
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParam {
    pub page: Option<String>,
}

/// A rendered page and whether it may be kept in the cache.
struct View {
    html: String,
    cacheable: bool,
}

impl View {
    fn new(html: String) -> Self {
        Self { html, cacheable: true }
    }

    /// Pages past the end are never cached; any `?page=` value is accepted.
    fn listing(html: String, page: u32, total_pages: u32) -> Self {
        Self {
            html,
            cacheable: page <= total_pages,
        }
    }
}

/// Serves `key` from the cache or renders it, unless draft mode is on.
async fn cached<F, Fut>(state: &AppState, key: String, render: F) -> Result<Html<String>, AppError>
where
    F: FnOnce(bool) -> Fut,
    Fut: Future<Output = Result<View, AppError>>,
{
    let draft = state.draft_mode.is_enabled();
    if !draft {
        if let Some(html) = state.views.get(&key).await {
            debug!(path = %key, "View cache hit");
            return Ok(Html(html));
        }
    }
    let seen = state.views.generation().await;
    let view = render(draft).await?;
    if !draft && view.cacheable {
        state.views.put(key, view.html.clone(), seen).await;
    }
    Ok(Html(view.html))
}

fn list_key(base: &str, page: u32) -> String {
    if page == DEFAULT_PAGE {
        base.to_string()
    } else {
        format!("{base}?page={page}")
    }
}

/// `GET /next`
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let api = state.local_api().await?;
    cached(&state, "/next".to_string(), |draft| async move {
        let total_posts = api.posts.count(Where::default(), draft).await?;
        let published = api.posts.count_published().await?;
        let total_products = api.products.count(Where::default(), draft).await?;
        let in_stock = api.products.count_in_stock().await?;
        let featured_posts = api.posts.find_featured(FEATURED_ON_INDEX, draft).await?;
        let featured_products = api.products.find_featured(FEATURED_ON_INDEX).await?;

        let mut body = format!(
            r#"<h1>Local API examples</h1>
<p>Pages rendered on the server straight from the document store.</p>
<ul>
    <li><a href="/next/posts">Posts</a>: {total_posts} total, {published} published</li>
    <li><a href="/next/products">Products</a>: {total_products} total, {in_stock} in stock</li>
    <li><a href="/next/server-functions">Server functions</a>: create, toggle and delete from forms</li>
</ul>"#
        );
        if !featured_posts.is_empty() {
            body.push_str("<h2>Featured posts</h2>");
            featured_posts
                .iter()
                .for_each(|p| body.push_str(&layout::post_card(p)));
        }
        if !featured_products.is_empty() {
            body.push_str("<h2>Featured products</h2>");
            featured_products
                .iter()
                .for_each(|p| body.push_str(&layout::product_card(p)));
        }
        Ok::<_, AppError>(View::new(layout::document(
            "Local API examples",
            draft,
            "/next",
            &body,
        )))
    })
    .await
}

/// `GET /next/posts?page=`
pub async fn posts(
    State(state): State<AppState>,
    Query(param): Query<PageParam>,
) -> Result<Html<String>, AppError> {
    let page = positive_or(param.page.as_deref(), DEFAULT_PAGE);
    let key = list_key("/next/posts", page);
    let api = state.local_api().await?;
    let path = key.clone();
    cached(&state, key, |draft| async move {
        let result = api.posts.paginate(page, POSTS_PER_PAGE, draft).await?;
        let mut body = format!("<h1>Posts</h1><p class=\"muted\">{} posts</p>", result.total_docs);
        if result.docs.is_empty() {
            body.push_str("<p>No posts yet.</p>");
        }
        result
            .docs
            .iter()
            .for_each(|p| body.push_str(&layout::post_card(p)));
        body.push_str(&layout::pager(
            "/next/posts",
            result.page,
            result.has_prev_page,
            result.has_next_page,
            result.total_pages,
        ));
        let html = layout::document("Posts", draft, &path, &body);
        Ok::<_, AppError>(View::listing(html, page, result.total_pages))
    })
    .await
}

/// `GET /next/posts/{slug}`; rendered on every request.
pub async fn post_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let draft = state.draft_mode.is_enabled();
    let path = format!("/next/posts/{slug}");
    let api = state.local_api().await?;
    let Some(post) = api.posts.find_by_slug(&slug, draft).await? else {
        let html = layout::not_found(draft, &path, "post");
        return Ok((StatusCode::NOT_FOUND, Html(html)).into_response());
    };

    let published = post
        .published_date
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "Unpublished draft".to_string());
    let tags = post
        .tags
        .iter()
        .map(|t| format!("#{}", text(t)))
        .collect::<Vec<_>>()
        .join(" ");
    let paragraphs: String = post
        .content
        .split("\n\n")
        .map(|p| format!("<p>{}</p>", text(p)))
        .collect();
    let body = format!(
        r#"<article><h1>{title}</h1><p class="muted">By {author} · {published} · {read} min read</p>{paragraphs}<p class="muted">{tags}</p></article><p><a href="/next/posts">← All posts</a></p>"#,
        title = text(&post.title),
        author = text(&post.author),
        read = post.read_time,
    );
    Ok(Html(layout::document(&post.title, draft, &path, &body)).into_response())
}

/// `GET /next/products?page=`
pub async fn products(
    State(state): State<AppState>,
    Query(param): Query<PageParam>,
) -> Result<Html<String>, AppError> {
    let page = positive_or(param.page.as_deref(), DEFAULT_PAGE);
    let key = list_key("/next/products", page);
    let api = state.local_api().await?;
    let path = key.clone();
    cached(&state, key, |draft| async move {
        let result = api.products.paginate(page, PRODUCTS_PER_PAGE).await?;
        let mut body = format!(
            "<h1>Products</h1><p class=\"muted\">{} products</p>",
            result.total_docs
        );
        if result.docs.is_empty() {
            body.push_str("<p>No products yet.</p>");
        }
        result
            .docs
            .iter()
            .for_each(|p| body.push_str(&layout::product_card(p)));
        body.push_str(&layout::pager(
            "/next/products",
            result.page,
            result.has_prev_page,
            result.has_next_page,
            result.total_pages,
        ));
        let html = layout::document("Products", draft, &path, &body);
        Ok::<_, AppError>(View::listing(html, page, result.total_pages))
    })
    .await
}

/// `GET /next/products/{slug}`
pub async fn product_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let draft = state.draft_mode.is_enabled();
    let path = format!("/next/products/{slug}");
    let api = state.local_api().await?;
    let Some(product) = api.products.find_by_slug(&slug, draft).await? else {
        let html = layout::not_found(draft, &path, "product");
        return Ok((StatusCode::NOT_FOUND, Html(html)).into_response());
    };

    let body = format!(
        r#"{card}<p><a href="/next/products">← All products</a></p>"#,
        card = layout::product_card(&product),
    );
    Ok(Html(layout::document(&product.name, draft, &path, &body)).into_response())
}
