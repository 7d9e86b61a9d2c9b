//! Reelforge Storage Library
//!
//! Blob-store abstraction and backends for uploaded clips. The pipeline only
//! ever needs "upload these bytes, give me a publicly readable URL", so the
//! trait is deliberately small; see [`traits::BlobStore`].
//!
//! # Blob key format
//!
//! Keys are `reels/{uuid}-{sanitized filename}`. The uuid prevents
//! collisions between same-named clips; sanitization restricts filenames to
//! a URL-safe alphabet. Key generation is centralized in the `keys` module
//! so all backends stay consistent. Keys must not contain `..` or a leading
//! `/`.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_blob_store;
#[cfg(feature = "storage-local")]
pub use local::LocalBlobStore;
pub use reelforge_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3BlobStore;
pub use traits::{BlobStore, StoreError, StoreResult};
