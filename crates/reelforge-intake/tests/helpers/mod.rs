//! Shared helpers for intake integration tests.

pub mod fixtures;

use anyhow::anyhow;
use async_trait::async_trait;
use bytes::Bytes;
use reelforge_core::StorageBackend;
use reelforge_intake::{IntakeSession, PendingComposer, ReelSubmissionHandler, UploadOrchestrator};
use reelforge_processing::{ClipProbe, ClipValidator};
use reelforge_storage::{BlobStore, StoreError, StoreResult};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const MAX_SIZE: u64 = 50 * 1024 * 1024;
pub const MAX_DURATION: f64 = 11.0;
pub const MAX_CLIPS: usize = 5;

/// Probe scripted through the clip payload: `"{duration}@{delay_ms}"`,
/// anything else fails the probe.
pub struct ScriptedProbe;

#[async_trait]
impl ClipProbe for ScriptedProbe {
    async fn duration_secs(&self, data: &[u8]) -> anyhow::Result<f64> {
        let script = std::str::from_utf8(data).unwrap_or("");
        let (duration, delay_ms) = script
            .split_once('@')
            .ok_or_else(|| anyhow!("unreadable container"))?;
        let duration: f64 = duration.parse().map_err(|_| anyhow!("bad duration"))?;
        let delay_ms: u64 = delay_ms.parse().map_err(|_| anyhow!("bad delay"))?;

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        Ok(duration)
    }
}

/// In-memory blob store that records upload name hints and can be told to
/// fail specific names.
#[derive(Default)]
pub struct MemoryBlobStore {
    pub uploads: Mutex<Vec<String>>,
    pub failing: HashSet<String>,
}

impl MemoryBlobStore {
    pub fn failing_on(names: &[&str]) -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            failing: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, name_hint: &str, _data: Bytes) -> StoreResult<(String, String)> {
        if self.failing.contains(name_hint) {
            return Err(StoreError::UploadFailed(format!("scripted: {name_hint}")));
        }
        self.uploads.lock().unwrap().push(name_hint.to_string());
        Ok((format!("reels/{name_hint}"), format!("mem://{name_hint}")))
    }

    async fn delete(&self, _blob_key: &str) -> StoreResult<()> {
        Ok(())
    }

    async fn exists(&self, _blob_key: &str) -> StoreResult<bool> {
        Ok(true)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// A fresh session wired to the scripted probe and product limits.
pub fn test_session() -> IntakeSession {
    IntakeSession::new(
        ClipValidator::new(Arc::new(ScriptedProbe), MAX_SIZE, MAX_DURATION),
        MAX_CLIPS,
    )
}

/// A submission handler over the given store, with an instant composer.
pub fn test_handler(store: Arc<MemoryBlobStore>) -> ReelSubmissionHandler {
    ReelSubmissionHandler::new(UploadOrchestrator::new(
        store,
        Arc::new(PendingComposer::new(Duration::from_millis(0))),
        Duration::from_secs(1),
    ))
}
