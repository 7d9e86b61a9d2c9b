//! Domain models

pub mod clip;
pub mod submission;

pub use clip::RawClip;
pub use submission::SubmissionResponse;
