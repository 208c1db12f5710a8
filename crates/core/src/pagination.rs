//! Page/limit pagination for list endpoints.
//!
//! Callers send `?page=&limit=`; the store wants `LIMIT/OFFSET`. Invalid or
//! non-positive values silently fall back to the defaults instead of
//! rejecting the request.

use serde::Serialize;

/// Page size used when `limit` is absent or invalid.
pub const DEFAULT_LIMIT: i64 = 10;

/// First page, used when `page` is absent or invalid.
pub const DEFAULT_PAGE: i64 = 1;

/// A normalized pagination cursor. Both fields are always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a cursor from raw query-string values.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Row offset of the first record on this page: `limit * (page - 1)`.
    pub fn offset(&self) -> i64 {
        self.limit.saturating_mul(self.page - 1)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
}

/// Pagination metadata returned alongside a page of results.
///
/// `page` and `limit` echo the request; `total` is counted independently of
/// the page fetch and may disagree with it under concurrent writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

impl PaginationMeta {
    pub fn new(request: PageRequest, total: i64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
        }
    }
}
