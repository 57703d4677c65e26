mod common;

use axum::http::{header, StatusCode};
use common::*;
use local_api_examples::clients::CollectionApi;
use local_api_examples::model::PostStatus;

#[tokio::test]
async fn index_is_cached_until_an_action_revalidates_it() {
    let state = state();
    let app = router(&state);

    let first = body_text(send(&app, get("/next")).await).await;
    assert!(first.contains("0 total"));
    assert!(state.views.get("/next").await.is_some());

    let response = send(
        &app,
        form_request(
            "/next/server-functions/posts",
            "title=Hello&slug=hello&content=Body&author=Ada&status=published",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/next/server-functions?message="), "{location}");

    let second = body_text(send(&app, get("/next")).await).await;
    assert!(second.contains("1 total, 1 published"));
}

#[tokio::test]
async fn demo_form_errors_redirect_with_error() {
    let app = router(&state());
    let response = send(
        &app,
        form_request("/next/server-functions/products", "name=Lamp&price=abc"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/next/server-functions?error=Invalid+price"), "{location}");

    let page = body_text(send(&app, get(location)).await).await;
    assert!(page.contains("Invalid price: abc"));
}

#[tokio::test]
async fn bulk_publish_form_publishes_listed_posts() {
    let state = state();
    let app = router(&state);
    for slug in ["a", "b"] {
        let body = format!("title={slug}&slug={slug}&content=c&author=x");
        send(&app, form_request("/next/server-functions/posts", &body)).await;
    }

    let response = send(
        &app,
        form_request("/next/server-functions/posts/bulk-publish", "ids=post_1%2C+post_2"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let api = state.local_api().await.unwrap();
    for id in ["post_1", "post_2"] {
        let post = api.posts.get(id.to_string()).await.unwrap().unwrap();
        assert_eq!(post.status, PostStatus::Published);
    }
}

#[tokio::test]
async fn unknown_slug_renders_404_page() {
    let app = router(&state());
    let response = send(&app, get("/next/products/ghost")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Not found"));
}

#[tokio::test]
async fn inventory_form_sets_inventory() {
    let state = state();
    let app = router(&state);
    send(
        &app,
        form_request(
            "/next/server-functions/products",
            "name=Lamp&slug=lamp&description=Bright&price=9.5",
        ),
    )
    .await;

    let response = send(
        &app,
        form_request("/next/server-functions/products/product_1/inventory", "inventory=14"),
    )
    .await;
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
    assert!(location.contains("message=Inventory+set+to+14"), "{location}");

    let listing = body_text(send(&app, get("/next/products/lamp")).await).await;
    assert!(listing.contains("In stock (14)"));
}

#[tokio::test]
async fn pages_past_the_end_are_not_cached() {
    let state = state();
    let app = router(&state);

    for page in 1001..1021 {
        let response = send(&app, get(&format!("/next/posts?page={page}"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let response = send(&app, get(&format!("/next/products?page={page}"))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(state.views.len().await, 0);

    send(&app, get("/next/posts")).await;
    assert!(state.views.get("/next/posts").await.is_some());
    assert_eq!(state.views.len().await, 1);
}
