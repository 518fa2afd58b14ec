use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::cli::TargetLanguage;
use crate::config::Config;
use crate::download::VideoFetcher;
use crate::language;
use crate::media::MediaProcessor;
use crate::output;
use crate::transcribe::{ModelSize, TranscriptionEngine};
use crate::translate::Translator;
use crate::utils;

/// Fixed artifact names in the working directory
pub const VIDEO_FILE: &str = "video.mp4";
pub const AUDIO_FILE: &str = "original_audio.mp3";
pub const TRANSCRIPT_FILE: &str = "transcription.txt";
pub const MUTED_VIDEO_FILE: &str = "video_without_audio.mp4";

/// Transcript text plus its on-disk mirror
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptArtifact {
    pub path: PathBuf,
    pub text: String,
}

/// A translated transcript (kept in memory only, never written to disk)
#[derive(Debug, Clone, Serialize)]
pub struct Translation {
    pub target: String,
    pub text: String,
}

/// Everything one pipeline run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// Source video artifact
    pub video_path: PathBuf,

    /// Extracted audio artifact
    pub audio_path: PathBuf,

    /// Audio-free copy of the video
    pub muted_video_path: PathBuf,

    /// Video title as reported by the site
    pub video_title: Option<String>,

    /// Video duration in seconds as reported by the site
    pub video_duration_secs: Option<i64>,

    /// Transcript, absent when the speech model failed to load
    pub transcript: Option<TranscriptArtifact>,

    /// Detected transcript language ("unknown" when detection gave up)
    pub detected_language: Option<String>,

    /// Translated transcript, absent unless requested and successful
    pub translation: Option<Translation>,

    /// Recovered failures surfaced during the run
    pub warnings: Vec<String>,

    /// When the run finished
    pub completed_at: DateTime<Utc>,
}

/// Drives the five pipeline stages in fixed order: cleanup, video
/// acquisition, audio extraction, transcription (with detection and optional
/// translation), audio removal.
///
/// Model-load and translation failures are recovered into warnings; every
/// other stage failure propagates and aborts the run.
pub struct Pipeline {
    config: Config,
    fetcher: VideoFetcher,
    media: MediaProcessor,
    translator: Translator,
    http: reqwest::Client,
    scratch: TempDir,
    quiet: bool,
}

impl Pipeline {
    /// Create a new pipeline from the loaded configuration
    pub fn new(config: Config, quiet: bool) -> Result<Self> {
        let http = reqwest::Client::new();

        let fetcher = VideoFetcher::new(config.tools.yt_dlp_path.clone());
        let media = MediaProcessor::new(config.tools.ffmpeg_path.clone());
        let translator = Translator::new(http.clone(), config.translation.endpoint.clone());

        let scratch = TempDir::new().context("Failed to create scratch directory")?;

        Ok(Self {
            config,
            fetcher,
            media,
            translator,
            http,
            scratch,
            quiet,
        })
    }

    /// Run the full pipeline for a URL
    pub async fn run(
        &self,
        url: &str,
        work_dir: &Path,
        target: TargetLanguage,
        model: ModelSize,
    ) -> Result<RunOutcome> {
        let mut warnings = Vec::new();

        // Stage 1: cleanup
        let removed = utils::clear_previous_outputs(work_dir)
            .context("Failed to clear previous artifacts")?;
        if removed > 0 {
            tracing::info!("Removed {} leftover artifact(s)", removed);
        }

        // Stage 2: video acquisition
        let video_path = work_dir.join(VIDEO_FILE);
        let spinner = self.stage_spinner("📦 Downloading video...");
        let video_info = self.fetcher.fetch(url, &video_path).await?;
        spinner.finish_with_message("✅ Video downloaded");

        // Stage 3: audio extraction
        let audio_path = work_dir.join(AUDIO_FILE);
        let spinner = self.stage_spinner("🎧 Extracting audio...");
        self.media.extract_audio(&video_path, &audio_path).await?;
        spinner.finish_with_message("✅ Audio extracted");

        // Stage 4: transcription. A model that cannot be loaded is reported
        // and skipped; an inference failure aborts the run.
        let spinner = self.stage_spinner("📝 Transcribing audio...");
        let engine = match TranscriptionEngine::load(model, &self.config, &self.http).await {
            Ok(engine) => Some(engine),
            Err(err) => {
                spinner.abandon_with_message("❌ Transcription skipped");
                let message = format!("Error loading Whisper model: {:#}", err);
                output::error_banner(&message);
                warnings.push(message);
                None
            }
        };

        let transcript = match engine {
            Some(engine) => {
                tracing::info!("Transcribing with Whisper {} model", engine.size());
                let pcm = self.media.decode_pcm(&audio_path, self.scratch.path()).await?;
                let transcript_path = work_dir.join(TRANSCRIPT_FILE);
                let text = engine.transcribe_to_file(pcm, &transcript_path).await?;
                spinner.finish_with_message("✅ Transcription completed");
                Some(TranscriptArtifact {
                    path: transcript_path,
                    text,
                })
            }
            None => None,
        };

        // Stage 4a: language detection (never fails)
        let detected_language = transcript
            .as_ref()
            .map(|t| language::detect(&t.text));

        // Stage 4b: translation, only with a transcript and a real target
        let translation = match (&transcript, target.code()) {
            (Some(t), Some(code)) => {
                let spinner = self.stage_spinner("🔄 Translating transcription...");
                match self.translator.translate(&t.text, code).await {
                    Ok(text) => {
                        spinner.finish_with_message("✅ Translation completed");
                        Some(Translation {
                            target: code.to_string(),
                            text,
                        })
                    }
                    Err(err) => {
                        spinner.abandon_with_message("❌ Translation skipped");
                        let message = format!("Translation failed: {:#}", err);
                        output::error_banner(&message);
                        warnings.push(message);
                        None
                    }
                }
            }
            _ => None,
        };

        // Stage 5: audio removal
        let muted_video_path = work_dir.join(MUTED_VIDEO_FILE);
        let spinner = self.stage_spinner("🔇 Removing audio from video...");
        self.media.strip_audio(&video_path, &muted_video_path).await?;
        spinner.finish_with_message("✅ Audio removed");

        Ok(RunOutcome {
            video_path,
            audio_path,
            muted_video_path,
            video_title: video_info.title,
            video_duration_secs: video_info.duration.map(|d| d.num_seconds()),
            transcript,
            detected_language,
            translation,
            warnings,
            completed_at: Utc::now(),
        })
    }

    /// Spinner for a pipeline stage (hidden in quiet mode)
    fn stage_spinner(&self, message: &str) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(120));
        spinner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_names_match_cleanup_set() {
        // Every fixed artifact must carry an extension the cleanup stage
        // removes, otherwise stale copies would survive into the next run.
        let dir = tempfile::tempdir().unwrap();
        for name in [VIDEO_FILE, AUDIO_FILE, TRANSCRIPT_FILE, MUTED_VIDEO_FILE] {
            fs_err::write(dir.path().join(name), b"stale").unwrap();
        }

        let removed = utils::clear_previous_outputs(dir.path()).unwrap();
        assert_eq!(removed, 4);
    }

    #[test]
    fn test_outcome_serializes() {
        let outcome = RunOutcome {
            video_path: PathBuf::from("video.mp4"),
            audio_path: PathBuf::from("original_audio.mp3"),
            muted_video_path: PathBuf::from("video_without_audio.mp4"),
            video_title: Some("A short clip".to_string()),
            video_duration_secs: Some(42),
            transcript: None,
            detected_language: None,
            translation: None,
            warnings: vec!["Error loading Whisper model: out of memory".to_string()],
            completed_at: Utc::now(),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["video_path"], "video.mp4");
        assert!(json["transcript"].is_null());
        assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
    }
}
