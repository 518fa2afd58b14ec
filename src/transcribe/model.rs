use anyhow::{Context, Result};
use clap::ValueEnum;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::ClipscribeError;

const MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Whisper model size selector
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    /// GGML weight file name in the whisper.cpp model repository
    pub fn file_name(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "ggml-tiny.bin",
            ModelSize::Base => "ggml-base.bin",
            ModelSize::Small => "ggml-small.bin",
            ModelSize::Medium => "ggml-medium.bin",
            ModelSize::Large => "ggml-large-v3.bin",
        }
    }

    /// Download URL for the model weights
    pub fn download_url(&self) -> String {
        format!("{}/{}", MODEL_BASE_URL, self.file_name())
    }

    /// Location of the weights inside a cache directory
    pub fn cache_path(&self, cache_dir: &Path) -> PathBuf {
        cache_dir.join(self.file_name())
    }
}

impl std::fmt::Display for ModelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSize::Tiny => write!(f, "tiny"),
            ModelSize::Base => write!(f, "base"),
            ModelSize::Small => write!(f, "small"),
            ModelSize::Medium => write!(f, "medium"),
            ModelSize::Large => write!(f, "large"),
        }
    }
}

/// Ensure the model weights are present in the cache directory, downloading
/// them from the whisper.cpp repository on first use. Returns the weight path.
pub async fn ensure_model(
    size: ModelSize,
    cache_dir: &Path,
    client: &reqwest::Client,
) -> Result<PathBuf> {
    let model_path = size.cache_path(cache_dir);
    if model_path.exists() {
        tracing::debug!("Using cached model: {}", model_path.display());
        return Ok(model_path);
    }

    fs_err::create_dir_all(cache_dir)
        .map_err(|e| ClipscribeError::ModelLoadFailed(format!("cannot create model cache: {}", e)))?;

    let url = size.download_url();
    tracing::info!("Downloading Whisper {} model from {}", size, url);

    let response = client
        .get(&url)
        .send()
        .await
        .context("Failed to request model download")?;

    if !response.status().is_success() {
        anyhow::bail!(ClipscribeError::ModelLoadFailed(format!(
            "model download returned HTTP {}",
            response.status()
        )));
    }

    let total_size = response.content_length().unwrap_or(0);
    let progress = ProgressBar::new(total_size);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
            .unwrap()
    );
    progress.set_message(format!("Downloading {} model (first run only)...", size));

    // Stream to a partial file first so an interrupted download never
    // masquerades as valid weights on the next run.
    let partial_path = model_path.with_extension("bin.part");
    let mut file = fs_err::File::create(&partial_path)?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Failed to read model download stream")?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        progress.set_position(downloaded);
    }

    file.flush()?;
    drop(file);
    fs_err::rename(&partial_path, &model_path)?;

    progress.finish_with_message("Model download complete");

    Ok(model_path)
}
