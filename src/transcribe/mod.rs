use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::sync::Arc;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::config::Config;
use crate::ClipscribeError;

pub mod model;

pub use model::ModelSize;

/// Local Whisper speech-to-text engine.
///
/// Loading (including the one-time weight download) is the recoverable part
/// of the transcription stage; once an engine exists, inference errors are
/// treated as fatal by the caller.
pub struct TranscriptionEngine {
    context: Arc<WhisperContext>,
    size: ModelSize,
}

impl TranscriptionEngine {
    /// Download (if needed) and load the Whisper model of the given size
    pub async fn load(size: ModelSize, config: &Config, client: &reqwest::Client) -> Result<Self> {
        let cache_dir = config.model_cache_dir()?;
        let model_path = model::ensure_model(size, &cache_dir, client).await?;

        tracing::info!("Loading Whisper {} model from {}", size, model_path.display());

        let path = model_path.to_string_lossy().to_string();
        let context = tokio::task::spawn_blocking(move || {
            WhisperContext::new_with_params(&path, WhisperContextParameters::default())
        })
        .await
        .context("Model load task panicked")?
        .map_err(|e| ClipscribeError::ModelLoadFailed(e.to_string()))?;

        Ok(Self {
            context: Arc::new(context),
            size,
        })
    }

    /// Model size this engine was loaded with
    pub fn size(&self) -> ModelSize {
        self.size
    }

    /// Run inference over 16 kHz mono PCM samples and return the transcript
    pub async fn transcribe(&self, pcm: Vec<f32>) -> Result<String> {
        let context = Arc::clone(&self.context);

        let text = tokio::task::spawn_blocking(move || -> Result<String> {
            let mut state = context
                .create_state()
                .context("Failed to create Whisper state")?;

            let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
            params.set_language(Some("auto"));
            params.set_print_progress(false);
            params.set_print_special(false);
            params.set_print_realtime(false);
            params.set_print_timestamps(false);

            state
                .full(params, &pcm)
                .map_err(|e| anyhow!(ClipscribeError::TranscriptionFailed(e.to_string())))?;

            let num_segments = state
                .full_n_segments()
                .context("Failed to read segment count")?;

            let mut transcript = String::new();
            for i in 0..num_segments {
                let segment = state
                    .full_get_segment_text(i)
                    .with_context(|| format!("Failed to read segment {}", i))?;
                let segment = segment.trim();
                if segment.is_empty() {
                    continue;
                }
                if !transcript.is_empty() {
                    transcript.push(' ');
                }
                transcript.push_str(segment);
            }

            Ok(transcript)
        })
        .await
        .context("Transcription task panicked")??;

        tracing::info!("Transcription produced {} characters", text.len());

        Ok(text)
    }

    /// Transcribe and mirror the text to the given file
    pub async fn transcribe_to_file(&self, pcm: Vec<f32>, output: &Path) -> Result<String> {
        let text = self.transcribe(pcm).await?;
        fs_err::write(output, &text).context("Failed to write transcription file")?;
        Ok(text)
    }
}
