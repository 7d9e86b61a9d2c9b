//! Reelforge CLI — validate clips and submit them for reel generation.
//!
//! Configuration comes from `REELFORGE_*` env vars (or a `.env` file); see
//! `reelforge_core::config` for the full list.

use anyhow::Context;
use bytes::Bytes;
use clap::{Parser, Subcommand};
use reelforge_cli::{init_tracing, is_mp4};
use reelforge_core::{RawClip, ReelConfig};
use reelforge_intake::{IntakeSession, PendingComposer, ReelSubmissionHandler, UploadOrchestrator};
use reelforge_processing::{ClipValidator, FfprobeDurationProbe};
use reelforge_storage::create_blob_store;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "reelforge", about = "Clip intake and reel submission")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate clips against the intake limits without uploading
    Validate {
        /// Paths to MP4 clips
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Upload clips and generate a reel
    Generate {
        /// Paths to MP4 clips
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Prompt describing the reel
        #[arg(long)]
        prompt: String,
    },
}

#[derive(Serialize)]
struct IntakeReport {
    accepted: Vec<String>,
    rejected: Vec<RejectionReport>,
    remaining_slots: usize,
}

#[derive(Serialize)]
struct RejectionReport {
    file: String,
    reason: String,
}

fn intake_report(session: &IntakeSession) -> IntakeReport {
    IntakeReport {
        accepted: session.accepted().iter().map(|c| c.name.clone()).collect(),
        rejected: session
            .errors()
            .iter()
            .map(|e| RejectionReport {
                file: e.clip_name.clone(),
                reason: e.reason.to_string(),
            })
            .collect(),
        remaining_slots: session.remaining_slots(),
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn build_session(config: &ReelConfig) -> anyhow::Result<IntakeSession> {
    let probe = FfprobeDurationProbe::new(
        config.ffprobe_path.clone(),
        Duration::from_secs(config.probe_timeout_secs),
    )?;
    let validator = ClipValidator::new(
        Arc::new(probe),
        config.max_clip_size_bytes,
        config.max_clip_duration_secs,
    );
    Ok(IntakeSession::new(validator, config.max_clips))
}

/// Read the given paths into clip candidates, applying the `.mp4` accept
/// filter the interactive picker would have applied.
async fn load_clips(paths: &[PathBuf]) -> anyhow::Result<Vec<RawClip>> {
    let mut clips = Vec::with_capacity(paths.len());
    for path in paths {
        if !is_mp4(path) {
            tracing::warn!(path = %path.display(), "Skipping non-MP4 file");
            continue;
        }
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Read {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("clip.mp4")
            .to_string();
        clips.push(RawClip::new(name, "video/mp4", Bytes::from(data)));
    }
    Ok(clips)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = ReelConfig::from_env()?;

    match cli.command {
        Commands::Validate { files } => {
            let mut session = build_session(&config)?;
            session.add_clips(load_clips(&files).await?).await;
            print_json(&intake_report(&session))?;
        }
        Commands::Generate { files, prompt } => {
            let mut session = build_session(&config)?;
            session.add_clips(load_clips(&files).await?).await;

            if !session.errors().is_empty() {
                print_json(&intake_report(&session))?;
                anyhow::bail!("Some clips were rejected; fix or drop them and retry");
            }

            let store = create_blob_store(&config).await?;
            let handler = ReelSubmissionHandler::new(UploadOrchestrator::new(
                store,
                Arc::new(PendingComposer::new(Duration::from_millis(
                    config.settle_delay_ms,
                ))),
                Duration::from_secs(config.upload_timeout_secs),
            ));

            let response = handler.handle(&mut session, &prompt).await;
            print_json(&response)?;

            if !response.success {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
