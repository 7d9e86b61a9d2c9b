//! Configuration module
//!
//! Env-driven configuration for the intake pipeline. Every field has a
//! default drawn from [`crate::constants`], so `ReelConfig::from_env()`
//! succeeds on a bare environment; variables override individual fields.
//! `.env` loading (dotenvy) is the binary's responsibility, not this
//! module's.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_FFPROBE_PATH, DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_SETTLE_DELAY_MS,
    DEFAULT_UPLOAD_TIMEOUT_SECS, MAX_CLIPS_PER_REEL, MAX_CLIP_DURATION_SECS, MAX_CLIP_SIZE_BYTES,
};
use crate::error::AppError;
use crate::storage_types::StorageBackend;

/// Application configuration for intake, probing, and upload.
#[derive(Clone, Debug)]
pub struct ReelConfig {
    // Intake limits
    pub max_clips: usize,
    pub max_clip_size_bytes: u64,
    pub max_clip_duration_secs: f64,
    // Duration probing
    pub ffprobe_path: String,
    pub probe_timeout_secs: u64,
    // Upload / submission
    pub upload_timeout_secs: u64,
    pub settle_delay_ms: u64,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub local_storage_path: String,
    pub local_storage_base_url: String,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    // Custom endpoint for S3-compatible providers (MinIO, Spaces, ...)
    pub s3_endpoint: Option<String>,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            max_clips: MAX_CLIPS_PER_REEL,
            max_clip_size_bytes: MAX_CLIP_SIZE_BYTES,
            max_clip_duration_secs: MAX_CLIP_DURATION_SECS,
            ffprobe_path: DEFAULT_FFPROBE_PATH.to_string(),
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            upload_timeout_secs: DEFAULT_UPLOAD_TIMEOUT_SECS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            storage_backend: StorageBackend::Local,
            local_storage_path: "./data/reels".to_string(),
            local_storage_base_url: "http://localhost:3000".to_string(),
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
        }
    }
}

/// Read and parse an env var, `Ok(None)` when unset or empty.
fn env_parsed<T>(key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{}: invalid value {:?}: {}", key, raw, e))),
        _ => Ok(None),
    }
}

impl ReelConfig {
    /// Build configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(v) = env_parsed("REELFORGE_MAX_CLIPS")? {
            config.max_clips = v;
        }
        if let Some(v) = env_parsed("REELFORGE_MAX_CLIP_SIZE_BYTES")? {
            config.max_clip_size_bytes = v;
        }
        if let Some(v) = env_parsed("REELFORGE_MAX_CLIP_DURATION_SECS")? {
            config.max_clip_duration_secs = v;
        }
        if let Some(v) = env_parsed::<String>("REELFORGE_FFPROBE_PATH")? {
            config.ffprobe_path = v;
        }
        if let Some(v) = env_parsed("REELFORGE_PROBE_TIMEOUT_SECS")? {
            config.probe_timeout_secs = v;
        }
        if let Some(v) = env_parsed("REELFORGE_UPLOAD_TIMEOUT_SECS")? {
            config.upload_timeout_secs = v;
        }
        if let Some(v) = env_parsed("REELFORGE_SETTLE_DELAY_MS")? {
            config.settle_delay_ms = v;
        }
        if let Some(v) = env_parsed("REELFORGE_STORAGE_BACKEND")? {
            config.storage_backend = v;
        }
        if let Some(v) = env_parsed::<String>("REELFORGE_LOCAL_STORAGE_PATH")? {
            config.local_storage_path = v;
        }
        if let Some(v) = env_parsed::<String>("REELFORGE_LOCAL_STORAGE_BASE_URL")? {
            config.local_storage_base_url = v;
        }
        config.s3_bucket = env_parsed("REELFORGE_S3_BUCKET")?;
        config.s3_region = env_parsed("REELFORGE_S3_REGION")?;
        config.s3_endpoint = env_parsed("REELFORGE_S3_ENDPOINT")?;

        Ok(config)
    }
}
