//! Shared paging arithmetic for admin list endpoints.

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;

/// Largest page size a list endpoint will serve.
pub const MAX_PAGE_SIZE: i64 = 100;
/// Page size when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Clamp a requested 1-based page number.
#[must_use]
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`.
#[must_use]
pub fn clamp_size(size: Option<i64>) -> i64 {
    size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Row offset for a clamped page/size pair.
#[must_use]
pub fn offset(page: i64, size: i64) -> i64 {
    (page - 1) * size
}
