//! # Store Errors
//!
//! Errors produced by the document store itself, independent of which collection
//! raised them. Collection clients map these into their own error enums.

/// Errors that can occur inside the document store or while talking to it.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Collection actor closed")]
    ActorClosed,
    #[error("Collection actor dropped response channel")]
    ActorDropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid document: {0}")]
    Invalid(String),
}

impl StoreError {
    /// True for failures of the store plumbing rather than of the request itself.
    pub fn is_internal(&self) -> bool {
        matches!(self, StoreError::ActorClosed | StoreError::ActorDropped)
    }
}
