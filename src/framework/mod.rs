//! In-process document store.
//!
//! Every collection is a [`CollectionActor`] owning its documents, reached through a
//! cloneable [`CollectionClient`]. The store is what the rest of the crate treats as the
//! opaque content-management backend: it answers `create`, `findByID`, `find`,
//! `count`, `update` and `delete`, enforces unique slugs and computes pagination.
//!
//! # Main Components
//!
//! - [`DocumentEntity`] - Trait that document types implement to be stored
//! - [`CollectionActor`] - Generic actor that owns one collection
//! - [`CollectionClient`] - Type-safe async handle to a collection actor
//! - [`Where`], [`Sort`], [`FindArgs`] - Query building blocks
//! - [`PaginatedDocs`] - The page envelope `find` returns
//! - [`StoreError`] - Common error type
//!
//! # Testing
//!
//! See the [`mock`] module for exercising clients without spawning actors.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod page;
pub mod query;

pub use actor::CollectionActor;
pub use client::CollectionClient;
pub use entity::DocumentEntity;
pub use error::StoreError;
pub use message::{CollectionRequest, Response};
pub use page::PaginatedDocs;
pub use query::{FindArgs, Operator, Sort, Where};
