//! Reelforge Intake Library
//!
//! The stateful half of the pipeline: an [`IntakeSession`] accumulates
//! validated clips under the per-reel cap and records rejections for
//! inspection and retry; an [`UploadOrchestrator`] pushes the accepted set
//! to the blob store concurrently and hands the result to the pluggable
//! reel composer; [`ReelSubmissionHandler`] is the seam the outer form (or
//! CLI) drives.

pub mod compose;
pub mod orchestrator;
pub mod session;
pub mod submission;

pub use compose::{ComposeReel, PendingComposer, ReelArtifact, UploadedClip};
pub use orchestrator::{SubmitError, UploadOrchestrator};
pub use session::{ClipError, IntakeSession};
pub use submission::ReelSubmissionHandler;
