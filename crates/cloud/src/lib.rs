//! Image store backends for the cake store.
//!
//! Both backends implement [`cakestore_core::upload::ImageUploader`]:
//!
//! - [`S3ImageUploader`] writes to any S3-compatible bucket and returns a
//!   URL under a configured public (CDN) base.
//! - [`MemoryImageUploader`] keeps bytes in-process and hands out
//!   deterministic `memory://` URLs. Used by tests and local development.

pub mod config;
pub mod content;
pub mod memory;
pub mod s3;

use std::sync::Arc;

use cakestore_core::upload::ImageUploader;

pub use config::{ImageStoreBackend, ImageStoreConfig};
pub use memory::MemoryImageUploader;
pub use s3::S3ImageUploader;

/// Build the uploader selected by `config`.
pub async fn build_uploader(config: &ImageStoreConfig) -> Arc<dyn ImageUploader> {
    match &config.backend {
        ImageStoreBackend::S3(s3) => Arc::new(S3ImageUploader::connect(s3.clone()).await),
        ImageStoreBackend::Memory => Arc::new(MemoryImageUploader::new()),
    }
}
