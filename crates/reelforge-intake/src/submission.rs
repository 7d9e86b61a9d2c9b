//! Form submission handling

use crate::orchestrator::UploadOrchestrator;
use crate::session::IntakeSession;
use reelforge_core::constants::{MSG_MISSING_INPUT, MSG_REEL_FAILURE, MSG_REEL_SUCCESS};
use reelforge_core::SubmissionResponse;

/// The externally visible entry point of the pipeline: takes the session's
/// accepted clips plus the user's prompt, runs the upload orchestration,
/// and maps the outcome onto the fixed user-facing messages.
pub struct ReelSubmissionHandler {
    orchestrator: UploadOrchestrator,
}

impl ReelSubmissionHandler {
    pub fn new(orchestrator: UploadOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Handle one submission attempt.
    ///
    /// Guards the preconditions itself (at least one accepted clip, a
    /// non-blank prompt) rather than trusting the surface that called it.
    /// On success the session is reset so a fresh reel can be assembled.
    pub async fn handle(&self, session: &mut IntakeSession, prompt: &str) -> SubmissionResponse {
        if !session.is_ready() || prompt.trim().is_empty() {
            return SubmissionResponse::failed(MSG_MISSING_INPUT);
        }

        match self.orchestrator.submit(session.accepted(), prompt).await {
            Ok(artifact) => {
                tracing::info!(
                    clip_urls = artifact.clip_urls.len(),
                    "Reel submission succeeded"
                );
                session.reset();
                SubmissionResponse::ok(MSG_REEL_SUCCESS)
            }
            Err(e) => {
                tracing::error!(error = %e, "Reel submission failed");
                SubmissionResponse::failed(MSG_REEL_FAILURE)
            }
        }
    }
}
