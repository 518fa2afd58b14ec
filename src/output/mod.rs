use anyhow::Result;
use console::style;
use std::path::Path;

use crate::pipeline::RunOutcome;
use crate::utils::{format_duration, format_file_size};

/// Print a red error banner for a recovered failure
pub fn error_banner(message: &str) {
    eprintln!("{} {}", style("❌").red().bold(), style(message).red());
}

/// Render the run outcome to the console
pub fn render(outcome: &RunOutcome) {
    println!("{}", format_summary(outcome));
}

/// Print the run outcome as JSON
pub fn print_json(outcome: &RunOutcome) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(())
}

/// Build the console summary: video metadata, transcript and translation
/// panels (only when present), and the artifact download listing.
fn format_summary(outcome: &RunOutcome) -> String {
    let mut out = String::new();

    if let Some(title) = &outcome.video_title {
        out.push_str(&format!("🎥 {}\n", style(title).bold()));
    }
    if let Some(secs) = outcome.video_duration_secs {
        out.push_str(&format!("   Duration: {}\n", format_duration(secs)));
    }

    if let Some(lang) = &outcome.detected_language {
        out.push_str(&format!(
            "\n🧭 Detected transcription language: {}\n",
            style(lang).bold()
        ));
    }

    if let Some(transcript) = &outcome.transcript {
        out.push_str(&format!("\n{}\n", style("📄 Transcription").bold()));
        out.push_str(&format!("{}\n", transcript.text));
    }

    if let Some(translation) = &outcome.translation {
        out.push_str(&format!(
            "\n{}\n",
            style(format!("🌐 Translated Transcription ({})", translation.target)).bold()
        ));
        out.push_str(&format!("{}\n", translation.text));
    }

    out.push_str(&format!("\n{}\n", style("⬇️  Artifacts").bold()));
    push_artifact_line(&mut out, "Original video", &outcome.video_path);
    push_artifact_line(&mut out, "Original audio", &outcome.audio_path);
    if let Some(transcript) = &outcome.transcript {
        push_artifact_line(&mut out, "Transcription", &transcript.path);
    }
    push_artifact_line(&mut out, "Video without audio", &outcome.muted_video_path);

    if !outcome.warnings.is_empty() {
        out.push_str(&format!("\n{}\n", style("⚠️  Warnings").yellow().bold()));
        for warning in &outcome.warnings {
            out.push_str(&format!("   • {}\n", warning));
        }
    }

    out
}

fn push_artifact_line(out: &mut String, label: &str, path: &Path) {
    let size = fs_err::metadata(path)
        .map(|m| format_file_size(m.len()))
        .unwrap_or_else(|_| "missing".to_string());

    out.push_str(&format!("   • {}: {} ({})\n", label, path.display(), size));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{TranscriptArtifact, Translation};
    use chrono::Utc;
    use std::path::PathBuf;

    fn outcome_without_transcript() -> RunOutcome {
        RunOutcome {
            video_path: PathBuf::from("video.mp4"),
            audio_path: PathBuf::from("original_audio.mp3"),
            muted_video_path: PathBuf::from("video_without_audio.mp4"),
            video_title: Some("Demo clip".to_string()),
            video_duration_secs: Some(95),
            transcript: None,
            detected_language: None,
            translation: None,
            warnings: vec!["Error loading Whisper model: no weights".to_string()],
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_transcript_panel_after_model_load_failure() {
        let summary = format_summary(&outcome_without_transcript());

        assert!(!summary.contains("Transcription\n"));
        assert!(!summary.contains("Detected transcription language"));
        // Video and audio panels still render
        assert!(summary.contains("Original video"));
        assert!(summary.contains("Original audio"));
        assert!(summary.contains("Video without audio"));
        assert!(summary.contains("no weights"));
    }

    #[test]
    fn test_no_translation_panel_when_not_requested() {
        let mut outcome = outcome_without_transcript();
        outcome.transcript = Some(TranscriptArtifact {
            path: PathBuf::from("transcription.txt"),
            text: "hello there".to_string(),
        });
        outcome.detected_language = Some("en".to_string());
        outcome.warnings.clear();

        let summary = format_summary(&outcome);

        assert!(summary.contains("hello there"));
        assert!(summary.contains("Detected transcription language"));
        assert!(!summary.contains("Translated Transcription"));
        assert!(!summary.contains("Warnings"));
    }

    #[test]
    fn test_translation_panel_names_target() {
        let mut outcome = outcome_without_transcript();
        outcome.transcript = Some(TranscriptArtifact {
            path: PathBuf::from("transcription.txt"),
            text: "hello there".to_string(),
        });
        outcome.translation = Some(Translation {
            target: "es".to_string(),
            text: "hola".to_string(),
        });
        outcome.warnings.clear();

        let summary = format_summary(&outcome);
        assert!(summary.contains("Translated Transcription (es)"));
        assert!(summary.contains("hola"));
    }

    #[test]
    fn test_missing_artifact_is_reported_not_fatal() {
        let summary = format_summary(&outcome_without_transcript());
        assert!(summary.contains("(missing)"));
    }
}
