//! Document types stored in the collections, with their create/update payloads.

pub mod post;
pub mod product;

pub use post::*;
pub use product::*;
