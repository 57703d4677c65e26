//! # Local API Examples
//!
//! > **CRUD over a document store's in-process API, served as JSON routes, rendered
//! > pages and form-driven server functions.**
//!
//! Two collections, `posts` and `products`, live in an in-process document store.
//! Each collection is an actor that owns its documents and answers `find`,
//! `findByID`, `create`, `update`, `delete` and `count` requests one at a time.
//! Everything else in the crate is glue over that "Local API".
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Store ([`framework`])
//! The generic [`CollectionActor`](framework::CollectionActor) and its cloneable
//! [`CollectionClient`](framework::CollectionClient), plus where clauses, sorting and
//! pagination. Collections plug in by implementing
//! [`DocumentEntity`](framework::DocumentEntity).
//!
//! ### 2. The Collections ([`post_collection`], [`product_collection`], [`model`])
//! Document types and the rules the store enforces for them: unique slugs, value
//! ranges and the toggle/inventory actions.
//!
//! ### 3. The Interface ([`clients`], [`lifecycle`])
//! [`PostClient`](clients::PostClient) and [`ProductClient`](clients::ProductClient)
//! are the operation helpers. [`LocalApiProvider`](lifecycle::LocalApiProvider)
//! starts the store once and hands out the same [`LocalApi`](lifecycle::LocalApi)
//! afterwards.
//!
//! ### 4. The Surfaces ([`api`], [`pages`], [`actions`], [`preview`])
//! - `/api/examples/{posts,products}[/{id}]`: JSON with a `{success, data, pagination?, error?}` envelope
//! - `/next/...`: server-rendered pages, cached per path
//! - `/next/server-functions`: forms calling the mutation [`actions`]
//! - `/next/preview` and `/next/exit-draft`: token-gated draft mode
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --secret dev --seed
//! cargo run -- --secret dev issue-token --subject editor
//! ```

pub mod actions;
pub mod api;
pub mod app;
pub mod cache;
pub mod clients;
pub mod config;
pub mod error;
pub mod filters;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod pages;
pub mod post_collection;
pub mod preview;
pub mod product_collection;

pub use app::{build_router, AppState};
pub use config::{Cli, Command, Config};
pub use error::AppError;
