//! Sample content loaded with `--seed`, so the pages have something to show.

use crate::lifecycle::local_api::{LocalApi, StartupError};
use crate::model::{PostCategory, PostCreate, PostStatus, ProductCategory, ProductCreate};
use tracing::info;

fn sample_posts() -> Vec<PostCreate> {
    let mut intro = PostCreate::new(
        "Getting started with the Local API",
        "getting-started-local-api",
        "Query collections directly from server code without an HTTP round trip.",
        "Ada Lovelace",
    );
    intro.excerpt = Some("Direct database access from server code.".into());
    intro.category = PostCategory::Tutorial;
    intro.status = PostStatus::Published;
    intro.featured = true;
    intro.read_time = Some(4);
    intro.tags = vec!["local-api".into(), "tutorial".into()];

    let mut design = PostCreate::new(
        "Designing content models",
        "designing-content-models",
        "Fields, relations and the shape of a good collection.",
        "Grace Hopper",
    );
    design.category = PostCategory::Design;
    design.status = PostStatus::Published;
    design.read_time = Some(7);
    design.tags = vec!["modeling".into()];

    let mut draft = PostCreate::new(
        "Draft mode in practice",
        "draft-mode-in-practice",
        "Previewing unpublished content with a signed token.",
        "Ada Lovelace",
    );
    draft.category = PostCategory::Technology;
    draft.tags = vec!["preview".into(), "draft".into()];

    vec![intro, design, draft]
}

fn sample_products() -> Vec<ProductCreate> {
    let mut keyboard = ProductCreate::new(
        "Mechanical Keyboard",
        "mechanical-keyboard",
        "Hot-swappable switches and an aluminium case.",
        129.0,
    );
    keyboard.featured = true;
    keyboard.inventory = 25;

    let mut hoodie = ProductCreate::new("Logo Hoodie", "logo-hoodie", "Heavyweight cotton.", 59.5);
    hoodie.category = ProductCategory::Clothing;
    hoodie.inventory = 40;

    let mut book = ProductCreate::new(
        "The Rust Programming Language",
        "rust-programming-language",
        "The official book, in print.",
        39.99,
    );
    book.category = ProductCategory::Books;
    book.in_stock = false;

    vec![keyboard, hoodie, book]
}

pub async fn load_sample_data(api: &LocalApi) -> Result<(), StartupError> {
    let posts = sample_posts();
    let products = sample_products();
    let (post_count, product_count) = (posts.len(), products.len());

    for post in posts {
        api.posts
            .create_post(post)
            .await
            .map_err(|e| StartupError::Seed(e.to_string()))?;
    }
    for product in products {
        api.products
            .create_product(product)
            .await
            .map_err(|e| StartupError::Seed(e.to_string()))?;
    }

    info!(posts = post_count, products = product_count, "Seeded sample data");
    Ok(())
}
