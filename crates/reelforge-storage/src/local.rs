use crate::keys::generate_blob_key;
use crate::traits::{BlobStore, StoreError, StoreResult};
use async_trait::async_trait;
use bytes::Bytes;
use reelforge_core::StorageBackend;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
    base_url: String,
}

impl LocalBlobStore {
    /// Create a new LocalBlobStore instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for blob storage (e.g., "./data/reels")
    /// * `base_url` - Base URL for serving blobs (e.g., "http://localhost:3000/reels")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StoreResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StoreError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalBlobStore {
            base_path,
            base_url,
        })
    }

    /// Convert a blob key to a filesystem path, rejecting keys that could
    /// escape the base directory.
    fn key_to_path(&self, blob_key: &str) -> StoreResult<PathBuf> {
        if blob_key.contains("..") || blob_key.starts_with('/') {
            return Err(StoreError::InvalidKey(
                "Blob key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(blob_key))
    }

    /// Generate public URL for a blob
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, name_hint: &str, data: Bytes) -> StoreResult<(String, String)> {
        let key = generate_blob_key(name_hint);
        let path = self.key_to_path(&key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StoreError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StoreError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StoreError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local blob upload successful"
        );

        Ok((key, url))
    }

    async fn delete(&self, blob_key: &str) -> StoreResult<()> {
        let path = self.key_to_path(blob_key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StoreError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(key = %blob_key, "Local blob delete successful");

        Ok(())
    }

    async fn exists(&self, blob_key: &str) -> StoreResult<bool> {
        let path = self.key_to_path(blob_key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
