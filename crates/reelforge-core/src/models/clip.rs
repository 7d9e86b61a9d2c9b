//! Clip candidate model

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One user-selected video clip, as handed over by the file-selection
/// surface (drag-drop or picker). Metadata is immutable once constructed;
/// `data` holds the full container payload.
///
/// `id` is minted at selection time and is the only identity the pipeline
/// trusts: removal and retry correlate on it, never on the filename, so two
/// same-named files stay distinct entries.
#[derive(Clone, Debug)]
pub struct RawClip {
    pub id: Uuid,
    pub name: String,
    pub size_bytes: u64,
    pub content_type: String,
    pub selected_at: DateTime<Utc>,
    pub data: Bytes,
}

impl RawClip {
    /// Wrap freshly selected bytes; `size_bytes` is derived from the data.
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            size_bytes: data.len() as u64,
            content_type: content_type.into(),
            selected_at: Utc::now(),
            data,
        }
    }
}
