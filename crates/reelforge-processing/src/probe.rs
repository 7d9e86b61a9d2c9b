//! Duration probing via container metadata

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

/// Reads a clip's duration without decoding its full payload.
#[async_trait]
pub trait ClipProbe: Send + Sync {
    /// Decode just the container metadata and return the duration in
    /// seconds. Fails on malformed containers, unsupported codecs, and I/O
    /// errors.
    async fn duration_secs(&self, data: &[u8]) -> Result<f64>;
}

/// ffprobe-backed probe. Clip bytes are spooled to a temp file for the
/// subprocess; the file is removed on every exit path, probe failure
/// included.
pub struct FfprobeDurationProbe {
    ffprobe_path: String,
    timeout: Duration,
}

impl FfprobeDurationProbe {
    pub fn new(ffprobe_path: impl Into<String>, timeout: Duration) -> Result<Self> {
        let ffprobe_path = ffprobe_path.into();

        if !ffprobe_path.chars().all(|c| {
            c.is_alphanumeric() || c == '/' || c == '-' || c == '_' || c == '.' || c == '\\'
        }) {
            return Err(anyhow!("Invalid ffprobe path: contains unsafe characters"));
        }

        Ok(Self {
            ffprobe_path,
            timeout,
        })
    }
}

/// Parse ffprobe's `format=duration` output into seconds.
fn parse_duration_output(stdout: &str) -> Result<f64> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() || trimmed == "N/A" {
        return Err(anyhow!("ffprobe reported no duration"));
    }
    trimmed
        .parse::<f64>()
        .with_context(|| format!("Unparseable ffprobe duration: {:?}", trimmed))
}

#[async_trait]
impl ClipProbe for FfprobeDurationProbe {
    #[tracing::instrument(skip(self, data), fields(
        process.executable.path = %self.ffprobe_path,
        size_bytes = data.len()
    ))]
    async fn duration_secs(&self, data: &[u8]) -> Result<f64> {
        let temp_file = tempfile::NamedTempFile::new().context("Create probe temp file")?;
        tokio::fs::write(temp_file.path(), data)
            .await
            .context("Write clip to probe temp file")?;

        let invocation = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(temp_file.path())
            .output();

        let output = tokio::time::timeout(self.timeout, invocation)
            .await
            .map_err(|_| anyhow!("ffprobe timed out after {:?}", self.timeout))?
            .context("Run ffprobe")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "ffprobe exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        parse_duration_output(&String::from_utf8_lossy(&output.stdout))
    }
}
