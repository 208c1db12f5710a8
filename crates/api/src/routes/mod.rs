pub mod cake;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /cake              list, create (multipart)
/// /cake/json         create (JSON, base64 image)
/// /cake/{id}         get, partial update (multipart), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/cake", cake::router())
}
