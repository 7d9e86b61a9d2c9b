//! Reel composition extension point

use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

/// One successfully uploaded clip, ready for composition.
#[derive(Debug, Clone)]
pub struct UploadedClip {
    pub clip_id: Uuid,
    pub name: String,
    pub url: String,
}

/// Aggregate result of a submission: every clip URL in selection order,
/// plus the composed reel once a real composer produces one.
#[derive(Debug, Clone)]
pub struct ReelArtifact {
    pub clip_urls: Vec<String>,
    pub reel_url: Option<String>,
}

/// Turns the uploaded clip set plus the prompt into a reel.
#[async_trait]
pub trait ComposeReel: Send + Sync {
    async fn compose(&self, clips: &[UploadedClip], prompt: &str) -> anyhow::Result<ReelArtifact>;
}

/// Composer stand-in while no real composition exists: settles for a fixed
/// delay and returns the clip URLs untouched. The delay is an await point,
/// so dropping the submission future cancels it cleanly.
pub struct PendingComposer {
    settle_delay: Duration,
}

impl PendingComposer {
    pub fn new(settle_delay: Duration) -> Self {
        Self { settle_delay }
    }
}

#[async_trait]
impl ComposeReel for PendingComposer {
    async fn compose(&self, clips: &[UploadedClip], prompt: &str) -> anyhow::Result<ReelArtifact> {
        tracing::debug!(
            clips = clips.len(),
            prompt_len = prompt.len(),
            "No composer configured; settling"
        );
        tokio::time::sleep(self.settle_delay).await;

        Ok(ReelArtifact {
            clip_urls: clips.iter().map(|c| c.url.clone()).collect(),
            reel_url: None,
        })
    }
}
