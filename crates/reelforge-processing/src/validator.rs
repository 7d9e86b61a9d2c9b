//! Per-clip validation

use crate::probe::ClipProbe;
use reelforge_core::RawClip;
use std::sync::Arc;

/// Why a clip (or a whole batch) was turned away at intake.
///
/// These never escape as process-level errors; the intake session records
/// them so the caller can show them and offer a retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClipRejectReason {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    SizeExceeded { size: u64, max: u64 },

    #[error("Duration too long: {duration:.2}s (max: {max:.0}s)")]
    DurationExceeded { duration: f64, max: f64 },

    #[error("Could not read clip metadata: {0}")]
    ProbeFailed(String),

    #[error("Too many files: at most {max} clips per reel")]
    CountExceeded { max: usize },
}

/// Clip validator
///
/// Checks one clip against the size and duration limits. The size check is
/// synchronous and runs first, so oversized files never cost a probe
/// subprocess; duration then comes from the container metadata.
pub struct ClipValidator {
    probe: Arc<dyn ClipProbe>,
    max_size_bytes: u64,
    max_duration_secs: f64,
}

impl ClipValidator {
    pub fn new(probe: Arc<dyn ClipProbe>, max_size_bytes: u64, max_duration_secs: f64) -> Self {
        Self {
            probe,
            max_size_bytes,
            max_duration_secs,
        }
    }

    /// Validate a single clip. No retries here; retry is the session's
    /// concern.
    pub async fn validate(&self, clip: &RawClip) -> Result<(), ClipRejectReason> {
        if clip.size_bytes > self.max_size_bytes {
            return Err(ClipRejectReason::SizeExceeded {
                size: clip.size_bytes,
                max: self.max_size_bytes,
            });
        }

        let duration = match self.probe.duration_secs(&clip.data).await {
            Ok(d) => d,
            Err(e) => {
                tracing::debug!(clip = %clip.name, error = %e, "Duration probe failed");
                return Err(ClipRejectReason::ProbeFailed(format!("{:#}", e)));
            }
        };

        if duration > self.max_duration_secs {
            return Err(ClipRejectReason::DurationExceeded {
                duration,
                max: self.max_duration_secs,
            });
        }

        Ok(())
    }
}
