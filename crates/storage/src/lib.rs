//! Object storage for uploaded gallery images.
//!
//! Wraps an S3-compatible bucket behind the three operations the rest of
//! the system needs: upload, batch remove with per-path outcome, and
//! public URL derivation. Paths are chosen by the caller and used verbatim
//! as object keys; the path, not the content, identifies an object.

use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use signworks_core::reconcile::RemovalOutcome;

/// Errors from object-store operations.
///
/// Batch removal does not error: per-path failures are reported through
/// [`RemovalOutcome`] so callers can clean up metadata for the paths that
/// did go away.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Upload of '{path}' failed: {message}")]
    Upload { path: String, message: String },
}

/// Object store configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket name.
    pub bucket: String,
    /// Region passed to the S3 client (default: `us-east-1`).
    pub region: String,
    /// Optional custom endpoint for S3-compatible stores (MinIO etc.).
    pub endpoint: Option<String>,
    /// Base URL under which stored objects are publicly served.
    pub public_url_base: String,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default     |
    /// |---------------------------|----------|-------------|
    /// | `STORAGE_BUCKET`          | **yes**  | --          |
    /// | `STORAGE_REGION`          | no       | `us-east-1` |
    /// | `STORAGE_ENDPOINT`        | no       | --          |
    /// | `STORAGE_PUBLIC_URL_BASE` | **yes**  | --          |
    ///
    /// Credentials come from the standard AWS environment/profile chain.
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing.
    pub fn from_env() -> Self {
        let bucket =
            std::env::var("STORAGE_BUCKET").expect("STORAGE_BUCKET must be set");
        let region = std::env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".into());
        let endpoint = std::env::var("STORAGE_ENDPOINT").ok().filter(|s| !s.is_empty());
        let public_url_base = std::env::var("STORAGE_PUBLIC_URL_BASE")
            .expect("STORAGE_PUBLIC_URL_BASE must be set");

        Self {
            bucket,
            region,
            endpoint,
            public_url_base,
        }
    }
}

/// Client for the gallery image bucket. Cheap to clone.
#[derive(Clone)]
pub struct ObjectStore {
    client: Client,
    bucket: String,
    public_url_base: String,
}

impl ObjectStore {
    /// Build a client from configuration, using the default AWS credential
    /// chain. A custom endpoint switches to path-style addressing, which
    /// S3-compatible stores expect.
    pub async fn connect(config: &StorageConfig) -> Self {
        let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_url_base: config.public_url_base.trim_end_matches('/').to_string(),
        }
    }

    /// Upload an object under the given path.
    pub async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Remove a batch of objects, reporting success or failure per path.
    ///
    /// Never fails as a whole: a path whose removal errors lands in
    /// `failed` and its metadata row must be retained by the caller.
    pub async fn remove_batch(&self, paths: &[String]) -> RemovalOutcome {
        let mut outcome = RemovalOutcome::default();

        for path in paths {
            match self
                .client
                .delete_object()
                .bucket(&self.bucket)
                .key(path)
                .send()
                .await
            {
                Ok(_) => outcome.removed.push(path.clone()),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Object removal failed");
                    outcome.failed.push(path.clone());
                }
            }
        }

        outcome
    }

    /// Public URL under which an object is served.
    pub fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_url_base, path)
    }
}
