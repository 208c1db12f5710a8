//! In-process image store.
//!
//! URLs are deterministic (`memory://<folder>/<n>.<ext>`, `n` counting from
//! 1) so tests can assert on them. The store can be switched into a failing
//! mode to exercise upload error paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use cakestore_core::error::CoreError;
use cakestore_core::upload::{ImageUploader, UploadOptions};

use crate::content;

const DEFAULT_FOLDER: &str = "cakes";

/// An object held by [`MemoryImageUploader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub url: String,
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub options: UploadOptions,
}

#[derive(Debug, Default)]
pub struct MemoryImageUploader {
    objects: Mutex<Vec<StoredImage>>,
    failing: AtomicBool,
}

impl MemoryImageUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// An uploader whose every call fails.
    pub fn failing() -> Self {
        let uploader = Self::default();
        uploader.set_failing(true);
        uploader
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful uploads.
    pub fn upload_count(&self) -> usize {
        self.lock().len()
    }

    pub fn objects(&self) -> Vec<StoredImage> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StoredImage>> {
        // A poisoned lock only means another test thread panicked mid-push.
        self.objects.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ImageUploader for MemoryImageUploader {
    async fn upload(&self, bytes: Vec<u8>, options: UploadOptions) -> Result<String, CoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::Upload("memory image store is set to fail".into()));
        }

        let kind = content::sniff(&bytes);
        let folder = options
            .folder
            .as_deref()
            .unwrap_or(DEFAULT_FOLDER)
            .trim_matches('/')
            .to_string();

        let mut objects = self.lock();
        let url = format!("memory://{folder}/{}.{}", objects.len() + 1, kind.extension);
        objects.push(StoredImage {
            url: url.clone(),
            bytes,
            content_type: kind.mime_type,
            options,
        });
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn urls_are_sequential() {
        let store = MemoryImageUploader::new();
        let a = store.upload(vec![1], UploadOptions::default()).await.unwrap();
        let b = store.upload(vec![2], UploadOptions::default()).await.unwrap();
        assert_eq!(a, "memory://cakes/1.bin");
        assert_eq!(b, "memory://cakes/2.bin");
        assert_eq!(store.upload_count(), 2);
        assert_eq!(store.objects()[1].bytes, vec![2]);
    }

    #[tokio::test]
    async fn png_gets_png_extension() {
        let store = MemoryImageUploader::new();
        let url = store
            .upload(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec(), UploadOptions::default())
            .await
            .unwrap();
        assert_eq!(url, "memory://cakes/1.png");
        assert_eq!(store.objects()[0].content_type, "image/png");
    }

    #[tokio::test]
    async fn failing_mode_stores_nothing() {
        let store = MemoryImageUploader::failing();
        let err = store.upload(vec![1], UploadOptions::default()).await.unwrap_err();
        assert_matches!(err, CoreError::Upload(_));
        assert_eq!(store.upload_count(), 0);

        store.set_failing(false);
        assert!(store.upload(vec![1], UploadOptions::default()).await.is_ok());
    }
}
