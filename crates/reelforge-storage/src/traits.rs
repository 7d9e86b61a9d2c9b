//! Storage abstraction trait
//!
//! This module defines the `BlobStore` trait that all storage backends must
//! implement.

use async_trait::async_trait;
use bytes::Bytes;
use reelforge_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid blob key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Blob storage abstraction
///
/// The upload pipeline works against this trait so the backend (local
/// filesystem, S3-compatible object store) stays swappable. Uploaded blobs
/// are publicly readable at the returned URL.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload a blob and return `(blob_key, public_url)`.
    ///
    /// `name_hint` is the original filename; backends fold it into the
    /// generated key but never trust it as-is.
    async fn upload(&self, name_hint: &str, data: Bytes) -> StoreResult<(String, String)>;

    /// Delete a blob by its key. Deleting an absent blob is not an error.
    async fn delete(&self, blob_key: &str) -> StoreResult<()>;

    /// Check whether a blob exists.
    async fn exists(&self, blob_key: &str) -> StoreResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
