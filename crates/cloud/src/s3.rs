//! S3-compatible image store.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use cakestore_core::error::CoreError;
use cakestore_core::upload::{ImageUploader, UploadOptions};

use crate::config::S3Config;
use crate::content;

/// Uploads images with `PutObject` and returns `<public_base_url>/<key>`.
#[derive(Debug, Clone)]
pub struct S3ImageUploader {
    client: Client,
    config: S3Config,
}

impl S3ImageUploader {
    /// Load AWS credentials from the default provider chain and build a client.
    pub async fn connect(config: S3Config) -> Self {
        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut s3_builder = aws_sdk_s3::config::Builder::from(&shared_config);
        if let Some(endpoint) = &config.endpoint {
            s3_builder = s3_builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self::with_client(Client::from_conf(s3_builder.build()), config)
    }

    pub fn with_client(client: Client, config: S3Config) -> Self {
        Self { client, config }
    }

    /// Object key for a new upload: `<prefix>/<uuid>.<ext>`.
    fn object_key(&self, options: &UploadOptions, extension: &str) -> String {
        let prefix = options
            .folder
            .as_deref()
            .unwrap_or(&self.config.key_prefix)
            .trim_matches('/');
        let name = uuid::Uuid::new_v4();
        if prefix.is_empty() {
            format!("{name}.{extension}")
        } else {
            format!("{prefix}/{name}.{extension}")
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.config.public_base_url)
    }
}

#[async_trait]
impl ImageUploader for S3ImageUploader {
    async fn upload(&self, bytes: Vec<u8>, options: UploadOptions) -> Result<String, CoreError> {
        let kind = content::sniff(&bytes);
        let key = self.object_key(&options, kind.extension);
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .content_type(kind.mime_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, bucket = %self.config.bucket, key = %key, "S3 upload failed");
                CoreError::Upload(format!("put_object {key}: {e}"))
            })?;

        tracing::info!(key = %key, size, content_type = kind.mime_type, "Image uploaded");
        Ok(self.public_url(&key))
    }
}
