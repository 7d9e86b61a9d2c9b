//! Concurrent upload orchestration

use crate::compose::{ComposeReel, ReelArtifact, UploadedClip};
use futures::future::join_all;
use reelforge_core::RawClip;
use reelforge_storage::BlobStore;
use std::sync::Arc;
use std::time::Duration;

/// Submission failure. The `Display` text is deliberately generic; the
/// underlying storage or composer error is logged, never surfaced.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("One or more clip uploads failed")]
    Upload(#[source] anyhow::Error),

    #[error("Reel composition failed")]
    Compose(#[source] anyhow::Error),
}

/// Uploads every accepted clip concurrently, then runs the composer stage.
///
/// Stateless across calls: each `submit` is independent given its inputs.
pub struct UploadOrchestrator {
    store: Arc<dyn BlobStore>,
    composer: Arc<dyn ComposeReel>,
    upload_timeout: Duration,
}

impl UploadOrchestrator {
    pub fn new(
        store: Arc<dyn BlobStore>,
        composer: Arc<dyn ComposeReel>,
        upload_timeout: Duration,
    ) -> Self {
        Self {
            store,
            composer,
            upload_timeout,
        }
    }

    /// Run one submission attempt.
    ///
    /// Callers guarantee `clips` is non-empty and `prompt` non-blank. All
    /// uploads are issued concurrently and all are awaited before the
    /// outcome is decided; the returned URLs align positionally with
    /// `clips` regardless of completion order. Any single upload failure
    /// (or timeout) fails the whole submission.
    pub async fn submit(
        &self,
        clips: &[RawClip],
        prompt: &str,
    ) -> Result<ReelArtifact, SubmitError> {
        let uploads = clips.iter().map(|clip| async move {
            let upload = self.store.upload(&clip.name, clip.data.clone());
            match tokio::time::timeout(self.upload_timeout, upload).await {
                Ok(Ok((_key, url))) => Ok(UploadedClip {
                    clip_id: clip.id,
                    name: clip.name.clone(),
                    url,
                }),
                Ok(Err(e)) => Err(anyhow::Error::new(e).context(format!(
                    "Upload of {} failed",
                    clip.name
                ))),
                Err(_) => Err(anyhow::anyhow!(
                    "Upload of {} timed out after {:?}",
                    clip.name,
                    self.upload_timeout
                )),
            }
        });

        let settled = join_all(uploads).await;

        let mut uploaded = Vec::with_capacity(settled.len());
        for result in settled {
            match result {
                Ok(clip) => uploaded.push(clip),
                Err(e) => {
                    tracing::error!(error = %format!("{:#}", e), "Clip upload failed; failing submission");
                    return Err(SubmitError::Upload(e));
                }
            }
        }

        tracing::info!(clips = uploaded.len(), "All clip uploads settled");

        let artifact = self
            .composer
            .compose(&uploaded, prompt)
            .await
            .map_err(|e| {
                tracing::error!(error = %format!("{:#}", e), "Composer stage failed");
                SubmitError::Compose(e)
            })?;

        Ok(artifact)
    }
}
