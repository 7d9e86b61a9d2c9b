//! Reelforge Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! constants shared across all Reelforge components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::ReelConfig;
pub use error::AppError;
pub use models::{RawClip, SubmissionResponse};
pub use storage_types::StorageBackend;
