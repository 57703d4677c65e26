//! Error types for the posts collection.

use thiserror::Error;

/// Errors that can occur during post operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PostError {
    /// The requested post was not found.
    #[error("Post not found: {0}")]
    NotFound(String),

    /// The store rejected the post's data (missing title, bad read time, ...).
    #[error("{0}")]
    Validation(String),

    /// Another post already uses the slug.
    #[error("{0}")]
    Conflict(String),

    /// An error occurred while communicating with the collection actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for PostError {
    fn from(msg: String) -> Self {
        PostError::ActorCommunicationError(msg)
    }
}
