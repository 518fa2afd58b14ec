//! Clipscribe - a Rust CLI tool for processing YouTube videos
//!
//! This library downloads a video by URL, extracts its audio track, transcribes
//! the audio with a local Whisper model, detects the transcript language,
//! optionally translates the transcript, and produces an audio-free copy of the
//! video for side-by-side comparison.

pub mod cli;
pub mod config;
pub mod download;
pub mod language;
pub mod media;
pub mod output;
pub mod pipeline;
pub mod transcribe;
pub mod translate;
pub mod utils;

pub use cli::{Cli, Commands, TargetLanguage};
pub use config::Config;
pub use pipeline::{Pipeline, RunOutcome};
pub use transcribe::model::ModelSize;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to the pipeline
#[derive(thiserror::Error, Debug)]
pub enum ClipscribeError {
    #[error("Video download failed: {0}")]
    DownloadFailed(String),

    #[error("Audio extraction failed: {0}")]
    AudioExtractionFailed(String),

    #[error("Speech model could not be loaded: {0}")]
    ModelLoadFailed(String),

    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    #[error("Required external tool is missing: {0}")]
    ToolMissing(String),
}
