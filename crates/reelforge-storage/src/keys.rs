//! Shared key generation for storage backends.
//!
//! Key format: `reels/{uuid}-{sanitized filename}`. All backends must use
//! this format for consistency.

use uuid::Uuid;

/// Generate a collision-free blob key from an untrusted filename.
pub fn generate_blob_key(name_hint: &str) -> String {
    format!("reels/{}-{}", Uuid::new_v4(), sanitize_filename(name_hint))
}

/// Restrict a filename to a URL- and path-safe alphabet. Anything outside
/// `[A-Za-z0-9._-]` becomes `_`, consecutive dots collapse to one (so a key
/// can never carry a `..` segment), and names with no real characters left
/// fall back to "clip".
fn sanitize_filename(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
            c
        } else {
            '_'
        };
        if c == '.' && cleaned.ends_with('.') {
            continue;
        }
        cleaned.push(c);
    }

    if cleaned.chars().all(|c| c == '_' || c == '.') {
        "clip".to_string()
    } else {
        cleaned
    }
}
