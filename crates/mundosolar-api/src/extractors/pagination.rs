//! Pagination query parameters.

use serde::Deserialize;

use mundosolar_core::types::pagination::PageRequest;

/// Query-string pagination parameters (`?page=2&page_size=50`).
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

impl PaginationParams {
    /// Convert into a clamped [`PageRequest`].
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1), self.page_size.unwrap_or(25))
    }
}
