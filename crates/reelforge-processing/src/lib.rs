//! Reelforge Processing Library
//!
//! Per-clip validation: a synchronous size check plus an asynchronous
//! duration probe that decodes only the container metadata. The probe is a
//! trait so tests (and future non-ffprobe deployments) can substitute their
//! own implementation.

pub mod probe;
pub mod validator;

pub use probe::{ClipProbe, FfprobeDurationProbe};
pub use validator::{ClipRejectReason, ClipValidator};
