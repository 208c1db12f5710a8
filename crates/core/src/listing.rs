//! Listing query: search term plus a whitelisted sort order.
//!
//! Sort columns and direction end up concatenated into SQL text, so they are
//! only ever produced from the closed enums below. Caller strings never reach
//! the query builder.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Sort used when `sort` is absent: `id, title`.
pub const DEFAULT_SORT: &[SortColumn] = &[SortColumn::Id, SortColumn::Title];

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Title,
    Description,
    Rating,
    CreatedAt,
    UpdatedAt,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Id,
        SortColumn::Title,
        SortColumn::Description,
        SortColumn::Rating,
        SortColumn::CreatedAt,
        SortColumn::UpdatedAt,
    ];

    /// Column name as it appears in the `cakes` table.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Title => "title",
            SortColumn::Description => "description",
            SortColumn::Rating => "rating",
            SortColumn::CreatedAt => "created_at",
            SortColumn::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortColumn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        SortColumn::ALL
            .into_iter()
            .find(|c| c.as_sql().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                let allowed: Vec<&str> = SortColumn::ALL.iter().map(|c| c.as_sql()).collect();
                CoreError::Validation(format!(
                    "sort column '{name}' is not allowed. Must be one of: {}",
                    allowed.join(", ")
                ))
            })
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(CoreError::Validation(format!(
                "sort_by '{other}' is not allowed. Must be one of: asc, desc"
            ))),
        }
    }
}

/// A validated listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CakeListQuery {
    /// Substring matched against `title`. `None` means no filter.
    pub search: Option<String>,
    /// Never empty.
    pub sort: Vec<SortColumn>,
    /// Applies to every column in `sort`.
    pub direction: SortDirection,
}

impl Default for CakeListQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort: DEFAULT_SORT.to_vec(),
            direction: SortDirection::Asc,
        }
    }
}

impl CakeListQuery {
    /// Build from the raw `search`, `sort` and `sort_by` query parameters.
    ///
    /// Empty values are treated as absent and replaced by the defaults.
    pub fn from_params(
        search: Option<&str>,
        sort: Option<&str>,
        sort_by: Option<&str>,
    ) -> Result<Self, CoreError> {
        let search = search.filter(|s| !s.is_empty()).map(str::to_string);

        let sort = match sort.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .split(',')
                .map(SortColumn::from_str)
                .collect::<Result<Vec<_>, _>>()?,
            None => DEFAULT_SORT.to_vec(),
        };

        let direction = match sort_by.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse()?,
            None => SortDirection::Asc,
        };

        Ok(Self {
            search,
            sort,
            direction,
        })
    }

    /// Render the `ORDER BY` list, e.g. `id ASC, title ASC`.
    pub fn order_by_sql(&self) -> String {
        self.sort
            .iter()
            .map(|c| format!("{} {}", c.as_sql(), self.direction.as_sql()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
