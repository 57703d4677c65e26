//! Shared HTML chrome. Every interpolated value goes through `html_escape`.

use crate::model::{Post, Product};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

const STYLE: &str = r#"
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
           max-width: 860px; margin: 40px auto; padding: 0 20px; line-height: 1.6; color: #333; }
    nav a { margin-right: 12px; }
    .banner { background: #fff3cd; border: 1px solid #ffe08a; padding: 8px 12px; border-radius: 6px; }
    .card { background: #f5f5f5; border-radius: 8px; padding: 12px 16px; margin: 12px 0; }
    .muted { color: #666; font-size: 0.9em; }
    .flash-ok { color: #1e7e34; } .flash-err { color: #b02a37; }
    form.inline { display: inline; }
"#;

/// Query-string encodes `pairs`; used for links and redirects.
pub fn query(pairs: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(pairs).unwrap_or_default()
}

pub fn document(title: &str, draft: bool, current_path: &str, body: &str) -> String {
    let banner = if draft {
        format!(
            r#"<p class="banner">Draft mode is on: unpublished content is visible. <a href="/next/exit-draft?{}">Exit draft mode</a></p>"#,
            attr(&query(&[("path", current_path)]))
        )
    } else {
        String::new()
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    <nav>
        <a href="/next">Home</a>
        <a href="/next/posts">Posts</a>
        <a href="/next/products">Products</a>
        <a href="/next/server-functions">Server functions</a>
    </nav>
    {banner}
    {body}
</body>
</html>"#,
        title = text(title),
    )
}

pub fn not_found(draft: bool, path: &str, what: &str) -> String {
    document(
        "Not found",
        draft,
        path,
        &format!("<h1>Not found</h1><p>No {} at this address.</p>", text(what)),
    )
}

pub fn post_card(post: &Post) -> String {
    let status = if post.is_published() { "" } else { " · draft" };
    let excerpt = post.excerpt.as_deref().unwrap_or_default();
    format!(
        r#"<div class="card"><h3><a href="/next/posts/{slug}">{title}</a></h3><p>{excerpt}</p><p class="muted">{author} · {category} · {read} min read{status}</p></div>"#,
        slug = attr(&post.slug),
        title = text(&post.title),
        excerpt = text(excerpt),
        author = text(&post.author),
        category = post.category,
        read = post.read_time,
    )
}

pub fn product_card(product: &Product) -> String {
    let stock = if product.in_stock {
        format!("In stock ({})", product.inventory)
    } else {
        "Out of stock".to_string()
    };
    format!(
        r#"<div class="card"><h3><a href="/next/products/{slug}">{name}</a></h3><p>{description}</p><p class="muted">${price:.2} · {category} · {stock}</p></div>"#,
        slug = attr(&product.slug),
        name = text(&product.name),
        description = text(&product.description),
        price = product.price,
        category = product.category,
    )
}

/// Previous/next links for a paginated list at `base`.
pub fn pager(base: &str, page: u32, has_prev: bool, has_next: bool, total_pages: u32) -> String {
    let prev = if has_prev {
        format!(r#"<a href="{base}?page={}">← Previous</a>"#, page - 1)
    } else {
        String::new()
    };
    let next = if has_next {
        format!(r#"<a href="{base}?page={}">Next →</a>"#, page + 1)
    } else {
        String::new()
    };
    format!(r#"<p class="muted">{prev} Page {page} of {total_pages} {next}</p>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::DocumentEntity;
    use crate::model::PostCreate;

    #[test]
    fn escapes_user_content() {
        let mut create = PostCreate::new("<script>alert(1)</script>", "xss", "c", "A & B");
        create.excerpt = Some("\"quoted\"".into());
        let post = Post::from_create_params("post_1".into(), create).unwrap();
        let html = post_card(&post);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("A &amp; B"));
    }

    #[test]
    fn draft_banner_links_back_to_current_page() {
        let html = document("Home", true, "/next/posts?page=2", "");
        assert!(html.contains("/next/exit-draft?path=%2Fnext%2Fposts%3Fpage%3D2"));
        assert!(!document("Home", false, "/next", "").contains("Draft mode is on"));
    }
}
