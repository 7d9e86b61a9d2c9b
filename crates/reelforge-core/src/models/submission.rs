//! Submission outcome model

use serde::Serialize;

/// Outcome reported to whoever drove the submission (form, CLI).
///
/// `message` is human-readable and deliberately coarse: a fixed success
/// string or a generic failure string; per-file causes live in the intake
/// session's error list instead.
#[derive(Clone, Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
}

impl SubmissionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
