mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

fn post_body(slug: &str) -> serde_json::Value {
    json!({
        "title": format!("Title {slug}"),
        "slug": slug,
        "content": "Body text",
        "author": "Ada",
        "category": "design",
        "tags": ["rust", "cms"]
    })
}

#[tokio::test]
async fn create_then_read_returns_the_input() {
    let state = state();
    let app = router(&state);

    let (status, created) = json(
        send(&app, json_request("POST", "/api/examples/posts", post_body("hello"))).await,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    let id = created["data"]["id"].as_str().expect("generated id").to_string();

    let (status, read) = json(send(&app, get(&format!("/api/examples/posts/{id}"))).await).await;
    assert_eq!(status, StatusCode::OK);
    let post = &read["data"];
    assert_eq!(post["title"], "Title hello");
    assert_eq!(post["slug"], "hello");
    assert_eq!(post["content"], "Body text");
    assert_eq!(post["author"], "Ada");
    assert_eq!(post["category"], "design");
    assert_eq!(post["tags"], json!(["rust", "cms"]));
    assert_eq!(post["status"], "draft");
    assert_eq!(post["readTime"], 5);
}

#[tokio::test]
async fn missing_required_fields_is_400() {
    let app = router(&state());
    let (status, body) = json(
        send(
            &app,
            json_request("POST", "/api/examples/posts", json!({"title": "Only a title"})),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "error": "Missing required fields: slug, content, author"})
    );
}

#[tokio::test]
async fn duplicate_slug_and_bad_price_are_400() {
    let app = router(&state());
    send(&app, json_request("POST", "/api/examples/posts", post_body("dup"))).await;
    let (status, body) = json(
        send(&app, json_request("POST", "/api/examples/posts", post_body("dup"))).await,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let product = json!({"name": "Lamp", "slug": "lamp", "description": "Bright", "price": -4});
    let (status, _) = json(
        send(&app, json_request("POST", "/api/examples/products", product)).await,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_id_is_404() {
    let app = router(&state());
    let (status, body) = json(send(&app, get("/api/examples/products/product_404")).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Product not found"}));

    let request = json_request("PATCH", "/api/examples/posts/post_404", json!({"title": "x"}));
    let (status, _) = json(send(&app, request).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_query_string_is_a_json_400() {
    let app = router(&state());
    for uri in [
        "/api/examples/posts?page=1&page=2",
        "/api/examples/products?limit=5&limit=6",
    ] {
        let (status, body) = json(send(&app, get(uri)).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }
}

#[tokio::test]
async fn list_filters_and_paginates() {
    let app = router(&state());
    for i in 0..12 {
        let mut body = post_body(&format!("post-{i}"));
        if i % 3 == 0 {
            body["status"] = json!("published");
        }
        send(&app, json_request("POST", "/api/examples/posts", body)).await;
    }

    let (status, page) = json(send(&app, get("/api/examples/posts?page=abc&limit=zero")).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"].as_array().unwrap().len(), 10);
    assert_eq!(
        page["pagination"],
        json!({"page": 1, "limit": 10, "totalPages": 2, "totalDocs": 12, "hasNextPage": true, "hasPrevPage": false})
    );
    // Newest first by default.
    assert_eq!(page["data"][0]["slug"], "post-11");

    let (_, published) = json(send(&app, get("/api/examples/posts?status=published")).await).await;
    assert_eq!(published["pagination"]["totalDocs"], 4);

    let (_, searched) = json(send(&app, get("/api/examples/posts?search=TITLE%20POST-7")).await).await;
    assert_eq!(searched["pagination"]["totalDocs"], 1);

    let (_, tagged) = json(send(&app, get("/api/examples/posts?tag=cms&limit=5&page=3")).await).await;
    assert_eq!(tagged["pagination"]["page"], 3);
    assert_eq!(tagged["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn product_price_range_is_inclusive() {
    let app = router(&state());
    for (slug, price) in [("a", 5.0), ("b", 10.0), ("c", 20.0), ("d", 25.0)] {
        let body = json!({"name": slug, "slug": slug, "description": "d", "price": price});
        send(&app, json_request("POST", "/api/examples/products", body)).await;
    }

    let (_, body) = json(
        send(&app, get("/api/examples/products?minPrice=10&maxPrice=20&sort=price")).await,
    )
    .await;
    let slugs: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["b", "c"]);

    let (_, body) = json(send(&app, get("/api/examples/products?minPrice=cheap")).await).await;
    assert_eq!(body["pagination"]["totalDocs"], 4);
}

#[tokio::test]
async fn patch_and_delete() {
    let app = router(&state());
    let (_, created) = json(
        send(&app, json_request("POST", "/api/examples/posts", post_body("edit-me"))).await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/examples/posts/{id}");

    let (status, patched) = json(
        send(&app, json_request("PATCH", &uri, json!({"status": "published"}))).await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["data"]["status"], "published");
    assert!(patched["data"]["publishedDate"].is_string());

    let request = axum::http::Request::delete(&uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, deleted) = json(send(&app, request).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"]["id"], id.as_str());

    let (status, _) = json(send(&app, get(&uri)).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
