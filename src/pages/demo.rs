//! `/next/server-functions`: forms wired straight to the mutation actions.
//!
//! Each POST handler translates its form into an action call and redirects back
//! (303) with `?message=` or `?error=`.

use super::layout::{self, query};
use crate::actions::{self, ActionResult, PostInput, ProductInput};
use crate::app::AppState;
use crate::clients::CollectionApi;
use crate::error::AppError;
use crate::framework::FindArgs;
use crate::model::{Post, PostCategory, PostStatus, PostUpdate, Product, ProductCategory};
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use serde::Deserialize;
use std::str::FromStr;

const PAGE_PATH: &str = "/next/server-functions";
const LIST_LIMIT: u32 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct Flash {
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Sends the browser back to the demo page carrying the action's outcome.
fn back<T>(result: ActionResult<T>) -> Redirect {
    let target = match (result.success, result.message, result.error) {
        (true, Some(message), _) => format!("{PAGE_PATH}?{}", query(&[("message", message.as_str())])),
        (false, _, Some(error)) => format!("{PAGE_PATH}?{}", query(&[("error", error.as_str())])),
        _ => PAGE_PATH.to_string(),
    };
    Redirect::to(&target)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_choice<T: FromStr<Err = String>>(value: Option<String>) -> Result<Option<T>, String> {
    non_empty(value).map(|v| v.parse()).transpose()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `GET /next/server-functions`. The listing is cached only when no flash is shown.
pub async fn page(
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
) -> Result<Html<String>, AppError> {
    let plain = flash.message.is_none() && flash.error.is_none();
    let draft = state.draft_mode.is_enabled();
    if plain && !draft {
        if let Some(html) = state.views.get(PAGE_PATH).await {
            return Ok(Html(html));
        }
    }

    // Drafts are always listed: this page is where they get published.
    let seen = state.views.generation().await;
    let api = state.local_api().await?;
    let posts = api.posts.find(FindArgs::new().limit(LIST_LIMIT).draft(true)).await?;
    let products = api.products.find(FindArgs::new().limit(LIST_LIMIT)).await?;

    let mut body = String::from("<h1>Server functions</h1>");
    if let Some(message) = &flash.message {
        body.push_str(&format!(r#"<p class="flash-ok">{}</p>"#, text(message)));
    }
    if let Some(error) = &flash.error {
        body.push_str(&format!(r#"<p class="flash-err">{}</p>"#, text(error)));
    }
    body.push_str(&post_forms(&posts.docs));
    body.push_str(&product_forms(&products.docs));

    let html = layout::document("Server functions", draft, PAGE_PATH, &body);
    if plain && !draft {
        state.views.put(PAGE_PATH, html.clone(), seen).await;
    }
    Ok(Html(html))
}

fn options(values: impl Iterator<Item = &'static str>) -> String {
    values
        .map(|v| format!(r#"<option value="{v}">{v}</option>"#))
        .collect()
}

fn button(action: &str, label: &str) -> String {
    format!(
        r#"<form class="inline" method="post" action="{}"><button>{}</button></form>"#,
        attr(action),
        text(label)
    )
}

fn post_forms(posts: &[Post]) -> String {
    let mut html = format!(
        r#"<h2>Posts</h2>
<form method="post" action="{PAGE_PATH}/posts" class="card">
    <input name="title" placeholder="Title">
    <input name="slug" placeholder="slug">
    <input name="author" placeholder="Author">
    <select name="category">{categories}</select>
    <select name="status"><option value="draft">draft</option><option value="published">published</option></select>
    <input name="tags" placeholder="tags, comma separated">
    <br><textarea name="excerpt" placeholder="Excerpt"></textarea>
    <textarea name="content" placeholder="Content"></textarea>
    <button>Create post</button>
</form>
<form method="post" action="{PAGE_PATH}/posts/bulk-publish" class="card">
    <input name="ids" placeholder="post_1, post_2">
    <button>Publish all</button>
</form>"#,
        categories = options(PostCategory::ALL.iter().map(PostCategory::as_str)),
    );
    for post in posts {
        let base = format!("{PAGE_PATH}/posts/{}", post.id);
        html.push_str(&format!(
            r#"<div class="card"><strong>{title}</strong> <span class="muted">{id} · {status}{featured}</span><br>{toggle} {feature} {delete}</div>"#,
            title = text(&post.title),
            id = text(&post.id),
            status = post.status,
            featured = if post.featured { " · featured" } else { "" },
            toggle = button(
                &format!("{base}/toggle-status"),
                if post.is_published() { "Unpublish" } else { "Publish" }
            ),
            feature = button(
                &format!("{base}/toggle-featured"),
                if post.featured { "Unfeature" } else { "Feature" }
            ),
            delete = button(&format!("{base}/delete"), "Delete"),
        ));
    }
    html
}

fn product_forms(products: &[Product]) -> String {
    let mut html = format!(
        r#"<h2>Products</h2>
<form method="post" action="{PAGE_PATH}/products" class="card">
    <input name="name" placeholder="Name">
    <input name="slug" placeholder="slug">
    <input name="price" placeholder="Price">
    <input name="inventory" placeholder="Inventory">
    <select name="category">{categories}</select>
    <br><textarea name="description" placeholder="Description"></textarea>
    <button>Create product</button>
</form>"#,
        categories = options(ProductCategory::ALL.iter().map(ProductCategory::as_str)),
    );
    for product in products {
        let base = format!("{PAGE_PATH}/products/{}", product.id);
        html.push_str(&format!(
            r#"<div class="card"><strong>{name}</strong> <span class="muted">{id} · ${price:.2} · {stock}{featured}</span><br>{toggle} {feature} {delete}
<form class="inline" method="post" action="{inventory_action}"><input name="inventory" size="4" value="{inventory}"><button>Set inventory</button></form></div>"#,
            name = text(&product.name),
            id = text(&product.id),
            price = product.price,
            stock = if product.in_stock { "in stock" } else { "out of stock" },
            featured = if product.featured { " · featured" } else { "" },
            toggle = button(&format!("{base}/toggle-stock"), "Toggle stock"),
            feature = button(
                &format!("{base}/toggle-featured"),
                if product.featured { "Unfeature" } else { "Feature" }
            ),
            delete = button(&format!("{base}/delete"), "Delete"),
            inventory_action = attr(&format!("{base}/inventory")),
            inventory = product.inventory,
        ));
    }
    html
}

#[derive(Debug, Default, Deserialize)]
pub struct PostForm {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub tags: Option<String>,
}

impl PostForm {
    fn into_input(self) -> Result<PostInput, String> {
        Ok(PostInput {
            category: parse_choice::<PostCategory>(self.category)?,
            status: parse_choice::<PostStatus>(self.status)?,
            title: non_empty(self.title),
            slug: non_empty(self.slug),
            content: non_empty(self.content),
            author: non_empty(self.author),
            excerpt: non_empty(self.excerpt),
            tags: self.tags.as_deref().map(split_list),
            ..Default::default()
        })
    }
}

pub async fn create_post(State(state): State<AppState>, Form(form): Form<PostForm>) -> Redirect {
    match form.into_input() {
        Ok(input) => back(actions::create_post(&state, input).await),
        Err(e) => back(ActionResult::<()>::failure(e)),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BulkForm {
    pub ids: Option<String>,
}

/// Publishes every listed post; stops at the first failure.
pub async fn bulk_publish(State(state): State<AppState>, Form(form): Form<BulkForm>) -> Redirect {
    let ids = form.ids.as_deref().map(split_list).unwrap_or_default();
    let update = PostUpdate {
        status: Some(PostStatus::Published),
        ..Default::default()
    };
    back(actions::bulk_update_posts(&state, &ids, update).await)
}

/// `toggle-status`, `toggle-featured` and `delete` on one post.
pub async fn post_op(
    State(state): State<AppState>,
    Path((id, op)): Path<(String, String)>,
) -> Redirect {
    match op.as_str() {
        "toggle-status" => back(actions::toggle_post_status(&state, &id).await),
        "toggle-featured" => back(actions::toggle_post_featured(&state, &id).await),
        "delete" => back(actions::delete_post(&state, &id).await),
        other => back(ActionResult::<()>::failure(format!("Unknown operation: {other}"))),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductForm {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub inventory: Option<String>,
}

impl ProductForm {
    fn into_input(self) -> Result<ProductInput, String> {
        let price = non_empty(self.price)
            .map(|p| p.trim().parse::<f64>().map_err(|_| format!("Invalid price: {p}")))
            .transpose()?;
        let inventory = non_empty(self.inventory)
            .map(|i| i.trim().parse::<u32>().map_err(|_| format!("Invalid inventory: {i}")))
            .transpose()?;
        Ok(ProductInput {
            category: parse_choice::<ProductCategory>(self.category)?,
            name: non_empty(self.name),
            slug: non_empty(self.slug),
            description: non_empty(self.description),
            price,
            inventory,
            ..Default::default()
        })
    }
}

pub async fn create_product(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Redirect {
    match form.into_input() {
        Ok(input) => back(actions::create_product(&state, input).await),
        Err(e) => back(ActionResult::<()>::failure(e)),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct InventoryForm {
    pub inventory: Option<String>,
}

/// `toggle-stock`, `toggle-featured` and `delete` on one product.
pub async fn product_op(
    State(state): State<AppState>,
    Path((id, op)): Path<(String, String)>,
) -> Redirect {
    match op.as_str() {
        "toggle-stock" => back(actions::toggle_product_stock(&state, &id).await),
        "toggle-featured" => back(actions::toggle_product_featured(&state, &id).await),
        "delete" => back(actions::delete_product(&state, &id).await),
        other => back(ActionResult::<()>::failure(format!("Unknown operation: {other}"))),
    }
}

pub async fn set_inventory(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<InventoryForm>,
) -> Redirect {
    let raw = form.inventory.unwrap_or_default();
    match raw.trim().parse::<u32>() {
        Ok(inventory) => back(actions::update_inventory(&state, &id, inventory).await),
        Err(_) => back(ActionResult::<()>::failure(format!(
            "Inventory must be a whole number, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_ids_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(split_list(" post_1, ,post_2 ,"), vec!["post_1", "post_2"]);
    }

    #[test]
    fn post_form_rejects_unknown_category() {
        let form = PostForm {
            category: Some("gardening".into()),
            ..Default::default()
        };
        assert!(form.into_input().is_err());
    }

    #[test]
    fn blank_form_fields_count_as_missing() {
        let form = ProductForm {
            name: Some("Lamp".into()),
            slug: Some(" ".into()),
            price: Some("12.5".into()),
            ..Default::default()
        };
        let input = form.into_input().unwrap();
        assert_eq!(
            input.missing_required().as_deref(),
            Some("Missing required fields: slug, description")
        );
    }
}
