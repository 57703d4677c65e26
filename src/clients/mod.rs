//! Type-safe wrappers around [`CollectionClient`](crate::framework::CollectionClient).
//!
//! These are the operation helpers the routes, pages and actions call.

pub mod collection_api;
pub mod post_client;
pub mod product_client;

pub use collection_api::*;
pub use post_client::*;
pub use product_client::*;
