use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::CakeService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cakestore_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cake record service (owns the image uploader).
    pub cakes: CakeService,
}
