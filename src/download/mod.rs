use anyhow::{Context, Result};
use chrono::Duration;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::utils::extract_domain;
use crate::ClipscribeError;

/// Metadata about a fetched video
#[derive(Debug, Clone)]
pub struct VideoInfo {
    /// Local path of the downloaded file
    pub path: PathBuf,

    /// Video title if the site reports one
    pub title: Option<String>,

    /// Duration if the site reports one
    pub duration: Option<Duration>,
}

/// Video fetcher using yt-dlp
pub struct VideoFetcher {
    yt_dlp_path: String,
}

impl VideoFetcher {
    pub fn new(yt_dlp_path: impl Into<String>) -> Self {
        Self {
            yt_dlp_path: yt_dlp_path.into(),
        }
    }

    /// Check if yt-dlp is available
    pub async fn check_availability(&self) -> Result<bool> {
        let output = Command::new(&self.yt_dlp_path)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        Ok(output.is_ok() && output.unwrap().status.success())
    }

    /// Get video information using yt-dlp
    async fn probe(&self, url: &str) -> Result<Value> {
        tracing::debug!("Probing video info for: {}", url);

        let output = Command::new(&self.yt_dlp_path)
            .args(["--dump-json", "--no-playlist", url])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(ClipscribeError::DownloadFailed(error.trim().to_string()));
        }

        let json_str = String::from_utf8(output.stdout)?;
        let info: Value = serde_json::from_str(&json_str)?;

        Ok(info)
    }

    /// Download the best available format of the video into the given file.
    /// Any downloader failure (bad URL, geo-restriction, network) propagates.
    pub async fn fetch(&self, url: &str, output_path: &Path) -> Result<VideoInfo> {
        if !self.check_availability().await? {
            anyhow::bail!(ClipscribeError::ToolMissing(
                "yt-dlp - install it from https://github.com/yt-dlp/yt-dlp".to_string()
            ));
        }

        if let Some(domain) = extract_domain(url) {
            tracing::info!("Fetching video from {}", domain);
        }

        let info = self.probe(url).await?;
        let title = info["title"].as_str().map(|s| s.to_string());
        let duration = info["duration"].as_f64().map(|d| Duration::seconds(d as i64));

        let output = Command::new(&self.yt_dlp_path)
            .args([
                "--format",
                "best",
                "--output",
                &output_path.to_string_lossy(),
                "--no-playlist",
                "--force-overwrites",
                "--newline",
                url,
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context("Failed to spawn yt-dlp")?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(ClipscribeError::DownloadFailed(error.trim().to_string()));
        }

        Ok(VideoInfo {
            path: output_path.to_path_buf(),
            title,
            duration,
        })
    }
}
