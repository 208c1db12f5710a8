//! Route definitions for the `/cake` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::cake;
use crate::state::AppState;

/// Routes mounted at `/cake`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create_form
/// POST   /json    -> create_json
/// GET    /{id}    -> get_detail
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cake::list).post(cake::create_form))
        .route("/json", post(cake::create_json))
        .route(
            "/{id}",
            get(cake::get_detail)
                .patch(cake::update)
                .delete(cake::delete),
        )
}
