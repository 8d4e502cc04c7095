//! Pagination envelope shared by admin list endpoints.

use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total rows matching the filter, across all pages.
    pub total: i64,
    /// 1-based page number.
    pub page: i64,
    /// Requested page size.
    pub size: i64,
    /// Total page count for this filter.
    pub pages: i64,
}

impl<T> Page<T> {
    /// Build a page envelope, deriving `pages` from `total` and `size`.
    ///
    /// A non-positive `size` is treated as one row per page so the page
    /// count stays meaningful.
    #[must_use]
    pub fn new(items: Vec<T>, total: i64, page: i64, size: i64) -> Self {
        let size = size.max(1);
        let pages = if total == 0 { 0 } else { (total + size - 1) / size };
        Self { items, total, page, size, pages }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
