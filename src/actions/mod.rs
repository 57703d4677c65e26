//! Server-side mutation actions.
//!
//! Every action validates its declared-required input, performs one store operation
//! (or a sequence, for bulk updates) and then revalidates a fixed set of cached
//! paths. Actions never return `Err`: failures come back as an [`ActionResult`]
//! with `success: false`.

pub mod posts;
pub mod products;

use crate::app::AppState;
use crate::error::AppError;
use serde::Serialize;
use tracing::{error, warn};

pub use posts::*;
pub use products::*;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ActionResult<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            data: Some(data),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            data: None,
        }
    }

    /// Failure from any error that maps onto the HTTP boundary's error cases.
    pub fn from_error(e: impl Into<AppError>) -> Self {
        let e = e.into();
        match &e {
            AppError::Internal(detail) => error!(%detail, "Action failed"),
            other => warn!(error = %other, "Action rejected"),
        }
        Self::failure(e.public_message())
    }
}

/// Turns a store outcome into an [`ActionResult`], revalidating `paths` on success.
async fn settle<T>(
    state: &AppState,
    paths: &[&str],
    result: Result<T, AppError>,
    message: impl Into<String>,
) -> ActionResult<T> {
    match result {
        Ok(data) => {
            state.views.invalidate(paths).await;
            ActionResult::ok(data, message)
        }
        Err(e) => ActionResult::from_error(e),
    }
}

fn missing_fields(fields: &[(&'static str, bool)]) -> Option<String> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    (!missing.is_empty()).then(|| format!("Missing required fields: {}", missing.join(", ")))
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
