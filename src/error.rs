//! Errors at the HTTP boundary.
//!
//! Every handler failure ends up here and is rendered as the JSON envelope
//! `{"success": false, "error": "..."}` with a matching status code.

use crate::api::envelope::ApiResponse;
use crate::lifecycle::StartupError;
use crate::post_collection::PostError;
use crate::product_collection::ProductError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    /// Missing fields, range violations, duplicate slugs, bad query input.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    /// Store plumbing failures; logged in full, reported generically.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message callers may see.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<PostError> for AppError {
    fn from(e: PostError) -> Self {
        match e {
            PostError::NotFound(_) => AppError::NotFound(e.to_string()),
            PostError::Validation(msg) | PostError::Conflict(msg) => AppError::BadRequest(msg),
            PostError::ActorCommunicationError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ProductError> for AppError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(_) => AppError::NotFound(e.to_string()),
            ProductError::Validation(msg) | ProductError::Conflict(msg) => {
                AppError::BadRequest(msg)
            }
            ProductError::ActorCommunicationError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<StartupError> for AppError {
    fn from(e: StartupError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(detail) = &self {
            error!(%detail, "Request failed");
        }
        let body = ApiResponse::<()>::failure(self.public_message());
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_details_are_masked() {
        let err = AppError::from(PostError::ActorCommunicationError(
            "Collection actor closed".into(),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn validation_messages_are_surfaced() {
        let err = AppError::from(ProductError::Validation("price must be a non-negative number, got -1".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.public_message().contains("non-negative"));

        let err = AppError::from(PostError::NotFound("post_3".into()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Post not found: post_3");
    }
}
