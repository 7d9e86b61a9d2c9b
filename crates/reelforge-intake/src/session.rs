//! Intake session state machine

use futures::future::join_all;
use reelforge_core::constants::BATCH_CAP_ERROR_NAME;
use reelforge_core::RawClip;
use reelforge_processing::{ClipRejectReason, ClipValidator};
use uuid::Uuid;

/// One rejection from the most recent intake batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipError {
    /// Id of the rejected candidate; `None` for the synthetic whole-batch
    /// cap entry.
    pub clip_id: Option<Uuid>,
    pub clip_name: String,
    pub reason: ClipRejectReason,
}

impl ClipError {
    fn rejected(clip: &RawClip, reason: ClipRejectReason) -> Self {
        Self {
            clip_id: Some(clip.id),
            clip_name: clip.name.clone(),
            reason,
        }
    }

    fn batch_cap(max: usize) -> Self {
        Self {
            clip_id: None,
            clip_name: BATCH_CAP_ERROR_NAME.to_string(),
            reason: ClipRejectReason::CountExceeded { max },
        }
    }
}

/// Accumulates accepted clips across intake calls and records the most
/// recent batch's rejections for inspection and retry.
///
/// Every method takes `&mut self`, so intake calls cannot overlap: callers
/// await one call before issuing the next, and a removal can never race a
/// batch that is still validating. The session itself never returns an
/// error; all failure is data in [`errors`](Self::errors).
pub struct IntakeSession {
    validator: ClipValidator,
    max_clips: usize,
    accepted: Vec<RawClip>,
    errors: Vec<ClipError>,
    last_batch: Vec<RawClip>,
}

impl IntakeSession {
    pub fn new(validator: ClipValidator, max_clips: usize) -> Self {
        Self {
            validator,
            max_clips,
            accepted: Vec::new(),
            errors: Vec::new(),
            last_batch: Vec::new(),
        }
    }

    /// Validate a batch of candidates concurrently and fold the survivors
    /// into the accepted set.
    ///
    /// Validations run concurrently but both the error list and the
    /// appended clips follow the batch's input order, not completion
    /// order. If the survivors would push the accepted set past the cap,
    /// the whole batch is discarded: `accepted` stays untouched and the
    /// error list becomes a single cap entry. The error list is replaced on
    /// every call, never appended to.
    pub async fn add_clips(&mut self, batch: Vec<RawClip>) {
        self.errors.clear();

        let validator = &self.validator;
        let verdicts = join_all(batch.iter().map(|clip| validator.validate(clip))).await;

        let mut newly_accepted = Vec::new();
        let mut rejected = Vec::new();
        for (clip, verdict) in batch.iter().zip(verdicts) {
            match verdict {
                Ok(()) => newly_accepted.push(clip.clone()),
                Err(reason) => rejected.push(ClipError::rejected(clip, reason)),
            }
        }

        if self.accepted.len() + newly_accepted.len() > self.max_clips {
            tracing::debug!(
                current = self.accepted.len(),
                incoming = newly_accepted.len(),
                max = self.max_clips,
                "Batch discarded: accepted set would exceed the clip cap"
            );
            self.errors = vec![ClipError::batch_cap(self.max_clips)];
        } else {
            self.accepted.extend(newly_accepted);
            self.errors = rejected;
        }

        self.last_batch = batch;
    }

    /// Remove the accepted clip with this id. No-op if absent; the error
    /// list is untouched either way.
    pub fn remove_clip(&mut self, id: Uuid) {
        if let Some(pos) = self.accepted.iter().position(|c| c.id == id) {
            let clip = self.accepted.remove(pos);
            tracing::debug!(clip = %clip.name, "Removed clip from accepted set");
        }
    }

    /// Re-run intake for the clips behind the current error entries.
    ///
    /// Entries are resolved back to candidates of the last batch by id;
    /// anything that no longer resolves (the synthetic cap entry has no id)
    /// is skipped. No-op when nothing resolves.
    pub async fn retry_failed(&mut self) {
        let retry: Vec<RawClip> = self
            .errors
            .iter()
            .filter_map(|e| e.clip_id)
            .filter_map(|id| self.last_batch.iter().find(|c| c.id == id).cloned())
            .collect();

        if retry.is_empty() {
            return;
        }

        tracing::debug!(clips = retry.len(), "Retrying failed clips");
        self.add_clips(retry).await;
    }

    /// The file-count half of the submit predicate. The caller owns the
    /// prompt and combines this with its own non-blank check.
    pub fn is_ready(&self) -> bool {
        !self.accepted.is_empty()
    }

    pub fn accepted(&self) -> &[RawClip] {
        &self.accepted
    }

    pub fn errors(&self) -> &[ClipError] {
        &self.errors
    }

    /// How many more clips this session will take.
    pub fn remaining_slots(&self) -> usize {
        self.max_clips.saturating_sub(self.accepted.len())
    }

    /// Drop all session state, ready for a fresh reel.
    pub fn reset(&mut self) {
        self.accepted.clear();
        self.errors.clear();
        self.last_batch.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use bytes::Bytes;
    use chrono::Utc;
    use reelforge_processing::ClipProbe;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    const MAX_SIZE: u64 = 50 * 1024 * 1024;
    const MAX_DURATION: f64 = 11.0;
    const MAX_CLIPS: usize = 5;

    /// Probe scripted through the clip payload: `"{duration}@{delay_ms}"`,
    /// anything unparsable fails the probe.
    struct ScriptedProbe;

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

    /// Probe that fails its first `failures` calls, then reports 5 seconds.
    struct FlakyProbe {
        failures: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ClipProbe for FlakyProbe {
        async fn duration_secs(&self, _data: &[u8]) -> anyhow::Result<f64> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(anyhow!("transient decoder error"))
            } else {
                Ok(5.0)
            }
        }
    }

    fn session_with(probe: Arc<dyn ClipProbe>) -> IntakeSession {
        IntakeSession::new(
            ClipValidator::new(probe, MAX_SIZE, MAX_DURATION),
            MAX_CLIPS,
        )
    }

    fn scripted_session() -> IntakeSession {
        session_with(Arc::new(ScriptedProbe))
    }

    /// A clip whose payload scripts the probe: 5s duration, no delay.
    fn valid_clip(name: &str) -> RawClip {
        scripted_clip(name, "5.0@0")
    }

    fn scripted_clip(name: &str, script: &str) -> RawClip {
        RawClip::new(name, "video/mp4", Bytes::from(script.to_string()))
    }

    fn oversized_clip(name: &str) -> RawClip {
        RawClip {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            size_bytes: 60 * 1024 * 1024,
            content_type: "video/mp4".to_string(),
            selected_at: Utc::now(),
            data: Bytes::from_static(b"5.0@0"),
        }
    }

    fn accepted_names(session: &IntakeSession) -> Vec<&str> {
        session.accepted().iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn happy_path_accepts_valid_clip() {
        let mut session = scripted_session();
        session.add_clips(vec![valid_clip("a.mp4")]).await;

        assert_eq!(accepted_names(&session), vec!["a.mp4"]);
        assert!(session.errors().is_empty());
        assert!(session.is_ready());
        assert_eq!(session.remaining_slots(), 4);
    }

    #[tokio::test]
    async fn oversized_clip_is_recorded_not_accepted() {
        let mut session = scripted_session();
        session.add_clips(vec![oversized_clip("big.mp4")]).await;

        assert!(session.accepted().is_empty());
        assert_eq!(session.errors().len(), 1);
        assert_eq!(session.errors()[0].clip_name, "big.mp4");
        assert!(matches!(
            session.errors()[0].reason,
            ClipRejectReason::SizeExceeded { .. }
        ));
        assert!(!session.is_ready());
    }

    #[tokio::test]
    async fn results_follow_input_order_not_completion_order() {
        let mut session = scripted_session();

        // a validates slowly, c instantly; b is rejected synchronously on
        // size. Output order must still be a, b, c.
        session
            .add_clips(vec![
                scripted_clip("a.mp4", "5.0@80"),
                oversized_clip("b.mp4"),
                scripted_clip("c.mp4", "5.0@0"),
            ])
            .await;

        assert_eq!(accepted_names(&session), vec!["a.mp4", "c.mp4"]);
        assert_eq!(session.errors().len(), 1);
        assert_eq!(session.errors()[0].clip_name, "b.mp4");
    }

    #[tokio::test]
    async fn batch_past_cap_is_discarded_whole() {
        let mut session = scripted_session();
        session
            .add_clips((0..4).map(|i| valid_clip(&format!("{i}.mp4"))).collect())
            .await;
        assert_eq!(session.accepted().len(), 4);

        // Two more valid clips would make six: the whole batch bounces.
        session
            .add_clips(vec![valid_clip("e.mp4"), valid_clip("f.mp4")])
            .await;

        assert_eq!(session.accepted().len(), 4);
        assert_eq!(
            session.errors(),
            &[ClipError {
                clip_id: None,
                clip_name: "Multiple files".to_string(),
                reason: ClipRejectReason::CountExceeded { max: MAX_CLIPS },
            }]
        );
    }

    #[tokio::test]
    async fn full_session_rejects_one_more() {
        let mut session = scripted_session();
        session
            .add_clips((0..5).map(|i| valid_clip(&format!("{i}.mp4"))).collect())
            .await;
        assert_eq!(session.accepted().len(), 5);
        assert_eq!(session.remaining_slots(), 0);

        session.add_clips(vec![valid_clip("one-more.mp4")]).await;

        assert_eq!(session.accepted().len(), 5);
        assert!(matches!(
            session.errors()[0].reason,
            ClipRejectReason::CountExceeded { .. }
        ));
    }

    #[tokio::test]
    async fn per_file_checks_still_reported_before_cap_check_passes() {
        // A batch whose only rejection is per-file: the cap is not hit, so
        // the rejection list is the per-file one.
        let mut session = scripted_session();
        session
            .add_clips(vec![
                valid_clip("ok.mp4"),
                scripted_clip("long.mp4", "12.5@0"),
            ])
            .await;

        assert_eq!(accepted_names(&session), vec!["ok.mp4"]);
        assert!(matches!(
            session.errors()[0].reason,
            ClipRejectReason::DurationExceeded { duration, .. } if duration == 12.5
        ));
    }

    #[tokio::test]
    async fn errors_are_replaced_not_appended() {
        let mut session = scripted_session();
        session.add_clips(vec![oversized_clip("big.mp4")]).await;
        assert_eq!(session.errors().len(), 1);

        session.add_clips(vec![valid_clip("ok.mp4")]).await;
        assert!(session.errors().is_empty());
    }

    #[tokio::test]
    async fn remove_clip_is_idempotent() {
        let mut session = scripted_session();
        session
            .add_clips(vec![valid_clip("a.mp4"), oversized_clip("b.mp4")])
            .await;
        let absent = uuid::Uuid::new_v4();

        session.remove_clip(absent);

        assert_eq!(accepted_names(&session), vec!["a.mp4"]);
        assert_eq!(session.errors().len(), 1);
    }

    #[tokio::test]
    async fn remove_distinguishes_same_named_clips() {
        let mut session = scripted_session();
        let first = valid_clip("twin.mp4");
        let second = valid_clip("twin.mp4");
        let first_id = first.id;
        let second_id = second.id;

        session.add_clips(vec![first, second]).await;
        assert_eq!(session.accepted().len(), 2);

        session.remove_clip(first_id);

        assert_eq!(session.accepted().len(), 1);
        assert_eq!(session.accepted()[0].id, second_id);
    }

    #[tokio::test]
    async fn retry_failed_recovers_after_transient_probe_error() {
        let mut session = session_with(Arc::new(FlakyProbe {
            failures: 1,
            calls: AtomicUsize::new(0),
        }));

        session.add_clips(vec![valid_clip("flaky.mp4")]).await;
        assert!(session.accepted().is_empty());
        assert!(matches!(
            session.errors()[0].reason,
            ClipRejectReason::ProbeFailed(_)
        ));

        session.retry_failed().await;

        assert_eq!(accepted_names(&session), vec!["flaky.mp4"]);
        assert!(session.errors().is_empty());
    }

    #[tokio::test]
    async fn retry_skips_the_synthetic_cap_entry() {
        let mut session = scripted_session();
        session
            .add_clips((0..5).map(|i| valid_clip(&format!("{i}.mp4"))).collect())
            .await;
        session.add_clips(vec![valid_clip("overflow.mp4")]).await;
        let errors_before = session.errors().to_vec();

        session.retry_failed().await;

        assert_eq!(session.accepted().len(), 5);
        assert_eq!(session.errors(), errors_before.as_slice());
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let mut session = scripted_session();
        session
            .add_clips(vec![valid_clip("a.mp4"), oversized_clip("b.mp4")])
            .await;

        session.reset();

        assert!(session.accepted().is_empty());
        assert!(session.errors().is_empty());
        assert!(!session.is_ready());
        assert_eq!(session.remaining_slots(), MAX_CLIPS);
    }
}
