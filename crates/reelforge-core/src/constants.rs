//! Shared constants for the intake and upload pipeline.

/// Maximum number of clips a single reel may contain.
pub const MAX_CLIPS_PER_REEL: usize = 5;

/// Maximum size of a single clip in bytes (50 MiB).
pub const MAX_CLIP_SIZE_BYTES: u64 = 50 * 1024 * 1024;

/// Maximum clip duration in seconds. The product limit is 10 seconds; the
/// extra second absorbs encoder metadata rounding.
pub const MAX_CLIP_DURATION_SECS: f64 = 11.0;

/// Name recorded on the synthetic error entry produced when an incoming
/// batch would push the accepted set past [`MAX_CLIPS_PER_REEL`].
pub const BATCH_CAP_ERROR_NAME: &str = "Multiple files";

/// Fixed message returned on a successful submission.
pub const MSG_REEL_SUCCESS: &str = "Reel generated successfully!";

/// Fixed message returned on a failed submission. Deliberately generic;
/// the underlying cause is logged, not surfaced.
pub const MSG_REEL_FAILURE: &str = "An error occurred while generating the reel.";

/// Message returned when the submission preconditions are not met.
pub const MSG_MISSING_INPUT: &str = "Missing videos or prompt";

/// Default ffprobe executable used for duration probing.
pub const DEFAULT_FFPROBE_PATH: &str = "ffprobe";

/// Default settling delay after uploads, in milliseconds. Stands in for the
/// reel-composition stage until a real composer is plugged in.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 3000;

/// Default bound on a single duration probe, in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Default bound on a single clip upload, in seconds.
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;
