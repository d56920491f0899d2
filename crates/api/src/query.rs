//! Shared query parameter types for API handlers.

use quill_core::content::ContentKind;
use quill_core::pagination::Page;
use serde::Deserialize;

/// Pagination parameters (`?page=&limit=`). Clamped by [`Page::new`].
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> Page {
        Page::new(self.page, self.limit)
    }
}

/// Query parameters for `GET /posts`.
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<ContentKind>,
    /// Category slug.
    pub category: Option<String>,
    /// Tag name.
    pub tag: Option<String>,
}

impl ListPostsParams {
    pub fn page(&self) -> Page {
        Page::new(self.page, self.limit)
    }
}
