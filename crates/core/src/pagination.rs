//! Offset pagination shared by the post and memo listings.

use serde::Serialize;

/// Page used when the client does not ask for one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client does not ask for one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Hard upper bound on the page size, regardless of the request.
pub const MAX_LIMIT: i64 = 100;

/// A clamped `(page, limit)` pair. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    /// Build a page from optional query values.
    ///
    /// `page` below 1 becomes 1; `limit` is clamped to `1..=MAX_LIMIT`.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// `meta` block of a paginated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl PageMeta {
    pub fn new(page: Page, total: i64) -> Self {
        Self {
            total,
            page: page.page,
            limit: page.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let page = Page::default();
        assert_eq!(page, Page { page: 1, limit: 10 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn limit_is_capped() {
        assert_eq!(Page::new(None, Some(1000)).limit, MAX_LIMIT);
        assert_eq!(Page::new(None, Some(0)).limit, 1);
        assert_eq!(Page::new(None, Some(-5)).limit, 1);
    }

    #[test]
    fn page_below_one_clamps() {
        assert_eq!(Page::new(Some(0), None).page, 1);
        assert_eq!(Page::new(Some(-3), None).page, 1);
    }

    #[test]
    fn offset_from_page_and_limit() {
        assert_eq!(Page::new(Some(3), Some(20)).offset(), 40);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let page = Page::new(Some(i64::MAX), Some(MAX_LIMIT));
        assert_eq!(page.offset(), i64::MAX);
    }
}
