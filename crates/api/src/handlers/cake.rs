//! Handlers for the `/cake` resource.
//!
//! Create and update accept `multipart/form-data` with text fields `title`,
//! `description`, `rating` and a file field `image`. `POST /cake/json` takes
//! the same fields as JSON with a base64 image.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cakestore_core::cake::{
    CakeForm, CakeResponse, CreateCake, CreateCakeJson, UpdateCake, IMAGE_FIELD,
};
use cakestore_core::listing::CakeListQuery;
use cakestore_core::pagination::PageRequest;
use cakestore_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::query::CakeListParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// POST /api/v1/cake
pub async fn create_form(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<CakeResponse>>)> {
    let form = read_cake_form(multipart?).await?;
    let command = CreateCake::from_form(form)?;
    let cake = state.cakes.create(command).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: cake })))
}

/// POST /api/v1/cake/json
pub async fn create_json(
    State(state): State<AppState>,
    body: Result<Json<CreateCakeJson>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<CakeResponse>>)> {
    let Json(body) = body?;
    let command = body.into_command()?;
    let cake = state.cakes.create(command).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: cake })))
}

/// GET /api/v1/cake?search=&sort=&sort_by=&limit=&page=
///
/// Malformed `limit`/`page` fall back to their defaults; an unknown sort
/// column or direction is rejected.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CakeListParams>,
) -> AppResult<Json<ListResponse<CakeResponse>>> {
    let query = CakeListQuery::from_params(
        params.search.as_deref(),
        params.sort.as_deref(),
        params.sort_by.as_deref(),
    )?;
    let page = PageRequest::from_raw(params.page.as_deref(), params.limit.as_deref());

    let (data, meta_data) = state.cakes.list(&query, page).await?;
    Ok(Json(ListResponse { data, meta_data }))
}

/// GET /api/v1/cake/{id}
pub async fn get_detail(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DataResponse<CakeResponse>>> {
    let id = parse_id(&raw_id)?;
    let cake = state.cakes.get_detail(id).await?;
    Ok(Json(DataResponse { data: cake }))
}

/// PATCH /api/v1/cake/{id}
///
/// Only non-empty fields are applied. An explicit `rating=0` resets the
/// rating.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<DataResponse<CakeResponse>>> {
    let id = parse_id(&raw_id)?;
    let form = read_cake_form(multipart?).await?;
    let command = UpdateCake::from_form(form)?;
    let cake = state.cakes.update(id, command).await?;
    Ok(Json(DataResponse { data: cake }))
}

/// DELETE /api/v1/cake/{id}
///
/// Returns 204 whether or not the cake existed.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&raw_id)?;
    state.cakes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Path ids are taken as strings so a non-numeric id gets our own 400 body.
fn parse_id(raw: &str) -> AppResult<DbId> {
    raw.parse::<DbId>()
        .map_err(|_| AppError::BadRequest(format!("invalid cake id '{raw}'")))
}

/// Drain a multipart body into a [`CakeForm`].
///
/// The `image` field is read as bytes; every other named field as text.
/// Unnamed parts are skipped.
async fn read_cake_form(mut multipart: Multipart) -> AppResult<CakeForm> {
    let mut form = CakeForm::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == IMAGE_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await?;
            form.set_image(bytes.to_vec(), file_name);
        } else {
            let value = field.text().await?;
            form.insert_field(name, value);
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert_matches!(parse_id("abc"), Err(AppError::BadRequest(msg)) if msg.contains("abc"));
        assert_matches!(parse_id(""), Err(AppError::BadRequest(_)));
    }
}
