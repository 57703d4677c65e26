mod common;

use common::state;
use local_api_examples::actions::{self, PostInput, ProductInput};
use local_api_examples::clients::CollectionApi;
use local_api_examples::model::{PostStatus, PostUpdate, ProductUpdate};
use local_api_examples::AppState;

fn post_input(slug: &str) -> PostInput {
    PostInput {
        title: Some(format!("Post {slug}")),
        slug: Some(slug.to_string()),
        content: Some("Body".into()),
        author: Some("Ada".into()),
        ..Default::default()
    }
}

async fn create_post(state: &AppState, slug: &str) -> String {
    let result = actions::create_post(state, post_input(slug)).await;
    assert!(result.success, "create failed: {:?}", result.error);
    result.data.expect("created post").id
}

#[tokio::test]
async fn create_reports_missing_fields_without_touching_the_store() {
    let state = state();
    let result = actions::create_post(
        &state,
        PostInput {
            title: Some("No body".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(!result.success);
    assert_eq!(
        result.error.as_deref(),
        Some("Missing required fields: slug, content, author")
    );
    let api = state.local_api().await.unwrap();
    assert_eq!(api.posts.count(Default::default(), true).await, Ok(0));
}

#[tokio::test]
async fn toggling_twice_restores_the_original_value() {
    let state = state();
    let id = create_post(&state, "toggle").await;

    let once = actions::toggle_post_status(&state, &id).await;
    assert_eq!(once.message.as_deref(), Some("Post published"));
    assert_eq!(once.data.unwrap().status, PostStatus::Published);
    let twice = actions::toggle_post_status(&state, &id).await;
    assert_eq!(twice.data.unwrap().status, PostStatus::Draft);

    let featured = actions::toggle_post_featured(&state, &id).await;
    assert!(featured.data.unwrap().featured);
    let unfeatured = actions::toggle_post_featured(&state, &id).await;
    assert!(!unfeatured.data.unwrap().featured);
}

#[tokio::test]
async fn concurrent_toggles_are_not_lost() {
    let state = state();
    let id = create_post(&state, "race").await;

    let toggles = (0..10).map(|_| {
        let state = state.clone();
        let id = id.clone();
        tokio::spawn(async move { actions::toggle_post_featured(&state, &id).await })
    });
    for handle in toggles.collect::<Vec<_>>() {
        assert!(handle.await.unwrap().success);
    }

    let api = state.local_api().await.unwrap();
    let post = api.posts.get(id).await.unwrap().unwrap();
    assert!(!post.featured, "an even number of toggles restores the flag");
}

#[tokio::test]
async fn bulk_update_commits_earlier_writes_and_reports_failure() {
    let state = state();
    let id1 = create_post(&state, "first").await;
    let ids = vec![id1.clone(), "post_missing".to_string()];
    let update = PostUpdate {
        status: Some(PostStatus::Published),
        ..Default::default()
    };

    let result = actions::bulk_update_posts(&state, &ids, update).await;
    assert!(!result.success);
    let error = result.error.unwrap();
    assert!(error.starts_with("Updated 1 of 2 posts"), "{error}");
    assert_eq!(result.data.map(|posts| posts.len()), Some(1));

    let api = state.local_api().await.unwrap();
    let first = api.posts.get(id1).await.unwrap().unwrap();
    assert_eq!(first.status, PostStatus::Published);
}

#[tokio::test]
async fn successful_actions_revalidate_cached_paths() {
    let state = state();
    let seen = state.views.generation().await;
    state.views.put("/next", "stale".into(), seen).await;
    state.views.put("/next/posts?page=2", "stale".into(), seen).await;
    state.views.put("/next/products", "kept".into(), seen).await;

    create_post(&state, "fresh").await;

    assert_eq!(state.views.get("/next").await, None);
    assert_eq!(state.views.get("/next/posts?page=2").await, None);
    assert_eq!(state.views.get("/next/products").await.as_deref(), Some("kept"));
}

#[tokio::test]
async fn failed_actions_leave_the_cache_alone() {
    let state = state();
    let seen = state.views.generation().await;
    state.views.put("/next", "cached".into(), seen).await;

    let result = actions::delete_post(&state, "post_nope").await;
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Post not found: post_nope"));
    assert_eq!(state.views.get("/next").await.as_deref(), Some("cached"));
}

#[tokio::test]
async fn product_actions() {
    let state = state();
    let created = actions::create_product(
        &state,
        ProductInput {
            name: Some("Lamp".into()),
            slug: Some("lamp".into()),
            description: Some("Bright".into()),
            price: Some(12.5),
            ..Default::default()
        },
    )
    .await;
    let id = created.data.expect("product").id;

    let out = actions::toggle_product_stock(&state, &id).await;
    assert!(!out.data.unwrap().in_stock);
    let back = actions::toggle_product_stock(&state, &id).await;
    assert!(back.data.unwrap().in_stock);

    let stocked = actions::update_inventory(&state, &id, 7).await;
    assert_eq!(stocked.data.unwrap().inventory, 7);

    let bulk = actions::bulk_update_products(
        &state,
        &[id.clone()],
        ProductUpdate {
            featured: Some(true),
            ..Default::default()
        },
    )
    .await;
    assert!(bulk.success);
    assert_eq!(bulk.message.as_deref(), Some("Updated 1 products"));

    let bad_price = actions::update_product(
        &state,
        &id,
        ProductUpdate {
            price: Some(-1.0),
            ..Default::default()
        },
    )
    .await;
    assert!(!bad_price.success);
    assert!(bad_price.error.unwrap().contains("non-negative"));

    assert!(actions::delete_product(&state, &id).await.success);
}
