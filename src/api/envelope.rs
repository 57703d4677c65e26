//! The JSON response envelope shared by every `/api/examples` route.

use crate::framework::PaginatedDocs;
use serde::Serialize;

/// `{success, data?, pagination?, message?, error?}`; absent parts are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: None,
            message: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            pagination: None,
            message: None,
            error: Some(error.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// A list response carrying the page's documents and its metadata.
    pub fn page(page: PaginatedDocs<T>) -> Self {
        let pagination = Pagination::of(&page);
        Self {
            pagination: Some(pagination),
            ..Self::ok(page.docs)
        }
    }
}

/// Pagination metadata exactly as the store computed it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub total_docs: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn of<T>(page: &PaginatedDocs<T>) -> Self {
        Self {
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
            total_docs: page.total_docs,
            has_next_page: page.has_next_page,
            has_prev_page: page.has_prev_page,
        }
    }
}
