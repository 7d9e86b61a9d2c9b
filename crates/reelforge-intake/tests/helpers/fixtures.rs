//! Clip fixtures for integration tests.

use bytes::Bytes;
use reelforge_core::RawClip;

/// A clip whose payload scripts the probe: `duration` seconds, no delay.
pub fn clip_of(name: &str, duration: f64) -> RawClip {
    RawClip::new(name, "video/mp4", Bytes::from(format!("{duration}@0")))
}

/// A valid 5-second clip.
pub fn valid_clip(name: &str) -> RawClip {
    clip_of(name, 5.0)
}

/// A clip claiming more bytes than the size limit allows.
pub fn oversized_clip(name: &str) -> RawClip {
    let mut clip = valid_clip(name);
    clip.size_bytes = 60 * 1024 * 1024;
    clip
}
