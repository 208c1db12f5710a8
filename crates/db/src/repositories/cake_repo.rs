//! Repository for the `cakes` table.
//!
//! Listing, counting and updating build their SQL at runtime with
//! [`QueryBuilder`]: values always go through `push_bind`, and the only text
//! spliced into the statement comes from fixed column names or the
//! [`CakeListQuery`] whitelist.

use cakestore_core::listing::CakeListQuery;
use cakestore_core::pagination::PageRequest;
use cakestore_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::cake::{Cake, CakeChanges, NewCake};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, image, rating, created_at, updated_at";

/// Provides CRUD, search and count operations for cakes.
pub struct CakeRepo;

impl CakeRepo {
    /// Insert a new cake, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewCake) -> Result<Cake, sqlx::Error> {
        let query = format!(
            "INSERT INTO cakes (title, description, image, rating, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cake>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image)
            .bind(input.rating)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Fetch one page of cakes matching the optional title search.
    pub async fn list(
        pool: &PgPool,
        query: &CakeListQuery,
        page: PageRequest,
    ) -> Result<Vec<Cake>, sqlx::Error> {
        let mut builder = list_query(query, page);
        builder.build_query_as::<Cake>().fetch_all(pool).await
    }

    /// Count all cakes matching the same title search as [`CakeRepo::list`].
    pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let mut builder = count_query(search);
        builder.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Find a cake by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Cake>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cakes WHERE id = $1");
        sqlx::query_as::<_, Cake>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply the `Some` fields of `changes` to a cake.
    ///
    /// Returns `None` if no row with the given `id` exists. An empty change
    /// set writes nothing and returns the current row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &CakeChanges,
    ) -> Result<Option<Cake>, sqlx::Error> {
        let Some(mut builder) = update_query(id, changes) else {
            return Self::find_by_id(pool, id).await;
        };
        tracing::debug!(cake_id = id, sql = builder.sql(), "Updating cake");
        builder
            .build_query_as::<Cake>()
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a cake. Returns `true` if a row was removed.
    ///
    /// Deleting a missing ID is not an error.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cakes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Query construction
// ---------------------------------------------------------------------------

fn list_query(query: &CakeListQuery, page: PageRequest) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM cakes"));
    push_search_filter(&mut builder, query.search.as_deref());
    builder
        .push(" ORDER BY ")
        .push(query.order_by_sql())
        .push(" LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset());
    builder
}

fn count_query(search: Option<&str>) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(id) FROM cakes");
    push_search_filter(&mut builder, search);
    builder
}

fn push_search_filter(builder: &mut QueryBuilder<'static, Postgres>, search: Option<&str>) {
    if let Some(term) = search.filter(|s| !s.is_empty()) {
        builder
            .push(" WHERE title LIKE ")
            .push_bind(like_pattern(term))
            .push(" ESCAPE '\\'");
    }
}

/// `%term%` with LIKE metacharacters escaped so `term` matches literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Build `UPDATE cakes SET ... WHERE id = $n`, or `None` for an empty change set.
///
/// Columns are visited in a fixed order and each one pushes its name and its
/// bound value together, so placeholders and values cannot drift apart.
fn update_query(id: DbId, changes: &CakeChanges) -> Option<QueryBuilder<'static, Postgres>> {
    if changes.is_empty() {
        return None;
    }

    let mut builder = QueryBuilder::new("UPDATE cakes SET ");
    {
        let mut set = builder.separated(", ");
        if let Some(title) = &changes.title {
            set.push("title = ").push_bind_unseparated(title.clone());
        }
        if let Some(description) = &changes.description {
            set.push("description = ")
                .push_bind_unseparated(description.clone());
        }
        if let Some(image) = &changes.image {
            set.push("image = ").push_bind_unseparated(image.clone());
        }
        if let Some(rating) = changes.rating {
            set.push("rating = ").push_bind_unseparated(rating);
        }
        if let Some(updated_at) = changes.updated_at {
            set.push("updated_at = ").push_bind_unseparated(updated_at);
        }
    }

    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(format!(" RETURNING {COLUMNS}"));
    Some(builder)
}

#[cfg(test)]
mod tests {
    use cakestore_core::listing::{SortColumn, SortDirection};

    use super::*;

    #[test]
    fn update_renders_only_set_columns_in_order() {
        let changes = CakeChanges {
            rating: Some(5.0),
            title: Some("New".into()),
            updated_at: Some(chrono::Utc::now()),
            ..Default::default()
        };
        let builder = update_query(7, &changes).unwrap();
        assert_eq!(
            builder.sql(),
            format!(
                "UPDATE cakes SET title = $1, rating = $2, updated_at = $3 WHERE id = $4 RETURNING {COLUMNS}"
            )
        );
    }

    #[test]
    fn update_with_every_column() {
        let changes = CakeChanges {
            title: Some("t".into()),
            description: Some("d".into()),
            image: Some("https://cdn/x.png".into()),
            rating: Some(0.0),
            updated_at: Some(chrono::Utc::now()),
        };
        let builder = update_query(1, &changes).unwrap();
        assert!(builder.sql().starts_with(
            "UPDATE cakes SET title = $1, description = $2, image = $3, rating = $4, updated_at = $5 WHERE id = $6"
        ));
    }

    #[test]
    fn update_zero_rating_is_written() {
        let changes = CakeChanges {
            rating: Some(0.0),
            ..Default::default()
        };
        let builder = update_query(1, &changes).unwrap();
        assert!(builder.sql().starts_with("UPDATE cakes SET rating = $1 WHERE id = $2"));
    }

    #[test]
    fn empty_update_renders_nothing() {
        assert!(update_query(1, &CakeChanges::default()).is_none());
    }

    #[test]
    fn list_without_search_has_no_where_clause() {
        let builder = list_query(&CakeListQuery::default(), PageRequest::default());
        assert_eq!(
            builder.sql(),
            format!("SELECT {COLUMNS} FROM cakes ORDER BY id ASC, title ASC LIMIT $1 OFFSET $2")
        );
    }

    #[test]
    fn list_with_search_and_custom_sort() {
        let query = CakeListQuery {
            search: Some("choco".into()),
            sort: vec![SortColumn::Rating],
            direction: SortDirection::Desc,
        };
        let builder = list_query(&query, PageRequest { page: 3, limit: 10 });
        assert_eq!(
            builder.sql(),
            format!(
                "SELECT {COLUMNS} FROM cakes WHERE title LIKE $1 ESCAPE '\\' ORDER BY rating DESC LIMIT $2 OFFSET $3"
            )
        );
    }

    #[test]
    fn count_shares_search_filter() {
        assert_eq!(count_query(None).sql(), "SELECT COUNT(id) FROM cakes");
        assert_eq!(
            count_query(Some("x")).sql(),
            "SELECT COUNT(id) FROM cakes WHERE title LIKE $1 ESCAPE '\\'"
        );
        assert_eq!(count_query(Some("")).sql(), "SELECT COUNT(id) FROM cakes");
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("choco"), "%choco%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
