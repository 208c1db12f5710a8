/// Image store selection loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ImageStoreConfig {
    pub backend: ImageStoreBackend,
}

#[derive(Debug, Clone)]
pub enum ImageStoreBackend {
    S3(S3Config),
    Memory,
}

impl ImageStoreBackend {
    pub fn name(&self) -> &'static str {
        match self {
            ImageStoreBackend::S3(_) => "s3",
            ImageStoreBackend::Memory => "memory",
        }
    }
}

/// Settings for an S3-compatible bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint (MinIO, R2, ...). Enables path-style addressing.
    pub endpoint: Option<String>,
    /// Base URL that object keys are appended to when building public URLs.
    pub public_base_url: String,
    /// Default key prefix for uploaded objects.
    pub key_prefix: String,
}

impl ImageStoreConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Default       |
    /// |-------------------------|---------------|
    /// | `IMAGE_STORE`           | `s3`          |
    /// | `S3_BUCKET`             | (required)    |
    /// | `S3_REGION`             | `us-east-1`   |
    /// | `S3_ENDPOINT`           | (none)        |
    /// | `IMAGE_PUBLIC_BASE_URL` | (required)    |
    /// | `IMAGE_KEY_PREFIX`      | `cakes`       |
    ///
    /// Panics on an unknown `IMAGE_STORE` or a missing required S3 variable.
    pub fn from_env() -> Self {
        let kind = std::env::var("IMAGE_STORE").unwrap_or_else(|_| "s3".into());

        let backend = match kind.as_str() {
            "memory" => ImageStoreBackend::Memory,
            "s3" => ImageStoreBackend::S3(S3Config {
                bucket: std::env::var("S3_BUCKET")
                    .expect("S3_BUCKET must be set when IMAGE_STORE=s3"),
                region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into()),
                endpoint: std::env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
                public_base_url: std::env::var("IMAGE_PUBLIC_BASE_URL")
                    .expect("IMAGE_PUBLIC_BASE_URL must be set when IMAGE_STORE=s3")
                    .trim_end_matches('/')
                    .to_string(),
                key_prefix: std::env::var("IMAGE_KEY_PREFIX").unwrap_or_else(|_| "cakes".into()),
            }),
            other => panic!("Unknown IMAGE_STORE '{other}'. Must be one of: s3, memory"),
        };

        Self { backend }
    }
}
