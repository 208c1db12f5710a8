//! Record lifecycle for cakes: image upload, timestamping, partial updates
//! and paginated listing.
//!
//! Nothing here retries. Store failures are logged with the cake id and,
//! like upload failures, returned to the handler unchanged. The only
//! translation is an absent row becoming [`CoreError::NotFound`].

use std::sync::Arc;

use cakestore_core::cake::{CakeResponse, CreateCake, ImagePayload, UpdateCake, ENTITY};
use cakestore_core::error::CoreError;
use cakestore_core::listing::CakeListQuery;
use cakestore_core::pagination::{PageRequest, PaginationMeta};
use cakestore_core::types::DbId;
use cakestore_core::upload::{ImageUploader, UploadOptions};
use cakestore_db::models::cake::{CakeChanges, NewCake};
use cakestore_db::repositories::CakeRepo;
use cakestore_db::DbPool;
use chrono::Utc;

use crate::error::{AppError, AppResult};

/// Orchestrates the image store and the `cakes` repository.
///
/// Built once at startup and cloned into every request through `AppState`.
#[derive(Clone)]
pub struct CakeService {
    pool: DbPool,
    uploader: Arc<dyn ImageUploader>,
}

impl CakeService {
    pub fn new(pool: DbPool, uploader: Arc<dyn ImageUploader>) -> Self {
        Self { pool, uploader }
    }

    /// Upload the image, then insert the record with `created_at = now`.
    ///
    /// An upload failure returns before the store is touched.
    pub async fn create(&self, command: CreateCake) -> AppResult<CakeResponse> {
        let image = self.upload(command.image).await?;

        let input = NewCake {
            title: command.title,
            description: command.description,
            image,
            rating: command.rating,
            created_at: Utc::now(),
        };

        let cake = CakeRepo::create(&self.pool, &input)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to insert cake"))?;
        tracing::info!(cake_id = cake.id, "Cake created");
        Ok(cake.into())
    }

    /// One page of matching cakes plus the total match count.
    ///
    /// The page and the count are two separate statements and may observe
    /// different snapshots under concurrent writes.
    pub async fn list(
        &self,
        query: &CakeListQuery,
        page: PageRequest,
    ) -> AppResult<(Vec<CakeResponse>, PaginationMeta)> {
        let rows = CakeRepo::list(&self.pool, query, page)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to list cakes"))?;
        let total = CakeRepo::count(&self.pool, query.search.as_deref())
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to count cakes"))?;

        let cakes = rows.into_iter().map(CakeResponse::from).collect();
        Ok((cakes, PaginationMeta::new(page, total)))
    }

    pub async fn get_detail(&self, id: DbId) -> AppResult<CakeResponse> {
        let cake = CakeRepo::find_by_id(&self.pool, id)
            .await
            .inspect_err(|e| tracing::error!(cake_id = id, error = %e, "Failed to fetch cake"))?
            .ok_or(not_found(id))?;
        Ok(cake.into())
    }

    /// Apply the supplied fields and stamp `updated_at`.
    ///
    /// A new image is uploaded first; the stored URL is only replaced once
    /// the upload succeeds.
    pub async fn update(&self, id: DbId, command: UpdateCake) -> AppResult<CakeResponse> {
        let image = match command.image {
            Some(payload) => Some(self.upload(payload).await?),
            None => None,
        };

        let changes = CakeChanges {
            title: command.title,
            description: command.description,
            image,
            rating: command.rating,
            updated_at: Some(Utc::now()),
        };

        let cake = CakeRepo::update(&self.pool, id, &changes)
            .await
            .inspect_err(|e| tracing::error!(cake_id = id, error = %e, "Failed to update cake"))?
            .ok_or(not_found(id))?;
        tracing::info!(cake_id = id, "Cake updated");
        Ok(cake.into())
    }

    /// Hard delete. A missing id is not an error.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let removed = CakeRepo::delete(&self.pool, id)
            .await
            .inspect_err(|e| tracing::error!(cake_id = id, error = %e, "Failed to delete cake"))?;
        tracing::info!(cake_id = id, removed, "Cake delete processed");
        Ok(())
    }

    async fn upload(&self, payload: ImagePayload) -> AppResult<String> {
        let options = UploadOptions {
            folder: None,
            file_name: payload.file_name,
        };
        let url = self
            .uploader
            .upload(payload.bytes, options)
            .await?;
        tracing::debug!(%url, "Image uploaded");
        Ok(url)
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}
