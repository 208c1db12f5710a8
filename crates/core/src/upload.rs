//! Image upload capability.
//!
//! The service hands raw image bytes to an external store and gets back a
//! retrievable URL. Implementations live in `cakestore-cloud`.

use async_trait::async_trait;

use crate::error::CoreError;

/// Per-upload hints passed through to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Key prefix / folder to place the object under. Backend default when `None`.
    pub folder: Option<String>,
    /// File name supplied by the client, if any.
    pub file_name: Option<String>,
}

/// Turns raw image bytes into a public URL.
///
/// Called at most once per create/update and never retried. Failures are
/// reported as [`CoreError::Upload`].
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>, options: UploadOptions) -> Result<String, CoreError>;
}
