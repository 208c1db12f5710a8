//! Cake entity model and DTOs.

use cakestore_core::cake::CakeResponse;
use cakestore_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `cakes` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Cake {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Image URL; empty when no image has been stored.
    pub image: String,
    pub rating: f32,
    pub created_at: Timestamp,
    /// `None` until the first update.
    pub updated_at: Option<Timestamp>,
}

impl From<Cake> for CakeResponse {
    fn from(cake: Cake) -> Self {
        Self {
            id: cake.id,
            title: cake.title,
            description: cake.description,
            image: cake.image,
            rating: cake.rating,
            created_at: cake.created_at,
            updated_at: cake.updated_at,
        }
    }
}

/// DTO for inserting a cake. `id` and `updated_at` are never written here.
#[derive(Debug, Clone)]
pub struct NewCake {
    pub title: String,
    pub description: String,
    pub image: String,
    pub rating: f32,
    pub created_at: Timestamp,
}

/// Columns to change on update. Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct CakeChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f32>,
    pub updated_at: Option<Timestamp>,
}

impl CakeChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.rating.is_none()
            && self.updated_at.is_none()
    }
}
