use anyhow::Result;
use std::path::Path;
use url::Url;

/// Extensions of pipeline artifacts, removed from the working directory
/// before each run
const OUTPUT_EXTENSIONS: &[&str] = &["mp3", "txt", "mp4"];

/// Delete leftover artifacts from a previous run.
///
/// Removes every file in the directory whose extension matches the artifact
/// set. Errors (permissions, file in use) propagate - a dirty working
/// directory is not a state the pipeline can start from. Returns the number
/// of files removed.
pub fn clear_previous_outputs(dir: &Path) -> Result<usize> {
    let mut removed = 0;

    for entry in fs_err::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };

        if OUTPUT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            tracing::debug!("Removing leftover artifact: {}", path.display());
            fs_err::remove_file(&path)?;
            removed += 1;
        }
    }

    Ok(removed)
}

/// Format file size in human-readable format
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes_f = bytes as f64;
    let unit_index = (bytes_f.log10() / THRESHOLD.log10()).floor() as usize;
    let unit_index = unit_index.min(UNITS.len() - 1);

    let size = bytes_f / THRESHOLD.powi(unit_index as i32);

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Format duration in human-readable format
pub fn format_duration(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Extract domain from URL for display purposes
pub fn extract_domain(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|host| {
            // Remove 'www.' prefix if present
            if host.starts_with("www.") {
                host[4..].to_string()
            } else {
                host.to_string()
            }
        })
}

/// Check if the current environment has required tools
pub async fn check_dependencies() -> Vec<String> {
    let mut missing = Vec::new();

    if !check_command_available("yt-dlp").await {
        missing.push("yt-dlp - required for video download".to_string());
    }

    if !check_command_available("ffmpeg").await {
        missing.push("ffmpeg - required for audio extraction and removal".to_string());
    }

    missing
}

/// Check if a command is available in PATH
async fn check_command_available(command: &str) -> bool {
    use tokio::process::Command;

    Command::new(command)
        .arg("--version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1048576), "1.0 MB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30), "30s");
        assert_eq!(format_duration(90), "1m 30s");
        assert_eq!(format_duration(3661), "1h 1m 1s");
    }

    #[test]
    fn test_extract_domain() {
        assert_eq!(
            extract_domain("https://www.youtube.com/watch?v=123"),
            Some("youtube.com".to_string())
        );
        assert_eq!(
            extract_domain("https://youtu.be/abc"),
            Some("youtu.be".to_string())
        );
        assert_eq!(extract_domain("invalid-url"), None);
    }

    #[test]
    fn test_clear_previous_outputs() {
        let dir = tempfile::tempdir().unwrap();

        for name in ["video.mp4", "original_audio.mp3", "transcription.txt"] {
            fs_err::write(dir.path().join(name), b"data").unwrap();
        }
        // Files outside the artifact set survive
        fs_err::write(dir.path().join("notes.md"), b"keep me").unwrap();
        fs_err::write(dir.path().join("Makefile"), b"keep me").unwrap();

        let removed = clear_previous_outputs(dir.path()).unwrap();
        assert_eq!(removed, 3);
        assert!(!dir.path().join("video.mp4").exists());
        assert!(!dir.path().join("original_audio.mp3").exists());
        assert!(!dir.path().join("transcription.txt").exists());
        assert!(dir.path().join("notes.md").exists());
        assert!(dir.path().join("Makefile").exists());
    }

    #[test]
    fn test_clear_previous_outputs_matches_any_name() {
        let dir = tempfile::tempdir().unwrap();
        fs_err::write(dir.path().join("stale_clip.MP4"), b"data").unwrap();
        fs_err::write(dir.path().join("random.txt"), b"data").unwrap();

        let removed = clear_previous_outputs(dir.path()).unwrap();
        assert_eq!(removed, 2);
    }

    #[test]
    fn test_clear_previous_outputs_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs_err::create_dir(dir.path().join("backups.mp4")).unwrap();

        let removed = clear_previous_outputs(dir.path()).unwrap();
        assert_eq!(removed, 0);
        assert!(dir.path().join("backups.mp4").exists());
    }

    #[tokio::test]
    async fn test_missing_command_is_detected() {
        assert!(!check_command_available("definitely-not-a-real-tool-xyz").await);
    }
}
