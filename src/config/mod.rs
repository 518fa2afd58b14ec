use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::transcribe::model::ModelSize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// External tool paths
    pub tools: ToolsConfig,

    /// Transcription settings
    pub transcription: TranscriptionConfig,

    /// Translation settings
    pub translation: TranslationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to the yt-dlp binary
    pub yt_dlp_path: String,

    /// Path to the ffmpeg binary
    pub ffmpeg_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// Whisper model size used when none is given on the command line
    pub default_model: ModelSize,

    /// Directory for downloaded model files (platform cache dir if unset)
    pub model_cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Translation service endpoint
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tools: ToolsConfig {
                yt_dlp_path: "yt-dlp".to_string(),
                ffmpeg_path: "ffmpeg".to_string(),
            },
            transcription: TranscriptionConfig {
                default_model: ModelSize::Base,
                model_cache_dir: None,
            },
            translation: TranslationConfig {
                endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs_err::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let config: Config = serde_yaml::from_str(&content)
                .context("Failed to parse config file")?;

            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("clipscribe").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.tools.yt_dlp_path.is_empty() {
            anyhow::bail!("yt-dlp path must not be empty");
        }
        if self.tools.ffmpeg_path.is_empty() {
            anyhow::bail!("ffmpeg path must not be empty");
        }

        Url::parse(&self.translation.endpoint)
            .context("Translation endpoint must be a valid URL")?;

        Ok(())
    }

    /// Directory where downloaded Whisper model files are kept
    pub fn model_cache_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.transcription.model_cache_dir {
            return Ok(dir.clone());
        }

        let cache_dir = dirs::cache_dir()
            .context("Could not determine cache directory")?;

        Ok(cache_dir.join("clipscribe").join("models"))
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  yt-dlp: {}", self.tools.yt_dlp_path);
        println!("  ffmpeg: {}", self.tools.ffmpeg_path);
        println!("  Default Model: {}", self.transcription.default_model);
        if let Some(dir) = &self.transcription.model_cache_dir {
            println!("  Model Cache: {}", dir.display());
        }
        println!("  Translation Endpoint: {}", self.translation.endpoint);
    }

    /// Interactive configuration setup
    pub async fn interactive_setup(&self) -> Result<()> {
        println!("Interactive configuration setup coming soon!");
        println!("For now, please edit the config file manually:");
        println!("  {}", Self::config_path()?.display());
        Ok(())
    }
}
