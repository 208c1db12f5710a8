//! Query parameter types for list endpoints.
//!
//! Every field is a raw string so malformed numbers reach the pagination
//! defaults instead of failing extraction.

use serde::Deserialize;

/// `GET /cake?search=&sort=&sort_by=&limit=&page=`
#[derive(Debug, Default, Deserialize)]
pub struct CakeListParams {
    pub search: Option<String>,
    /// Comma-separated sort columns.
    pub sort: Option<String>,
    /// Sort direction, `asc` or `desc`.
    pub sort_by: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}
