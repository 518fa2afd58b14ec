use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use uuid::Uuid;

use crate::ClipscribeError;

/// Sample rate expected by the Whisper model
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// ffmpeg-backed media operations: audio extraction, audio removal, and
/// PCM decoding for the speech model.
pub struct MediaProcessor {
    ffmpeg_path: String,
}

impl MediaProcessor {
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    /// Check if ffmpeg is available
    pub async fn check_availability(&self) -> Result<bool> {
        let output = Command::new(&self.ffmpeg_path)
            .arg("-version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        Ok(output.is_ok() && output.unwrap().status.success())
    }

    /// Demux the audio track of a video file into a standalone MP3 file
    pub async fn extract_audio(&self, video_path: &Path, audio_path: &Path) -> Result<()> {
        tracing::debug!(
            "Extracting audio: {} -> {}",
            video_path.display(),
            audio_path.display()
        );

        self.run_ffmpeg(&[
            "-y",
            "-i",
            &video_path.to_string_lossy(),
            "-vn",
            "-acodec",
            "libmp3lame",
            "-q:a",
            "2",
            &audio_path.to_string_lossy(),
        ])
        .await
        .map_err(|e| ClipscribeError::AudioExtractionFailed(format!("{:#}", e)))?;

        Ok(())
    }

    /// Produce a copy of the video with its audio track stripped.
    /// The video stream is copied without re-encoding.
    pub async fn strip_audio(&self, video_path: &Path, output_path: &Path) -> Result<()> {
        tracing::debug!(
            "Removing audio: {} -> {}",
            video_path.display(),
            output_path.display()
        );

        self.run_ffmpeg(&[
            "-y",
            "-i",
            &video_path.to_string_lossy(),
            "-c:v",
            "copy",
            "-an",
            &output_path.to_string_lossy(),
        ])
        .await
        .context("Failed to remove audio track")?;

        Ok(())
    }

    /// Decode an audio file to 16 kHz mono f32 PCM via a scratch WAV file
    pub async fn decode_pcm(&self, audio_path: &Path, scratch_dir: &Path) -> Result<Vec<f32>> {
        let wav_path = scratch_dir.join(format!(
            "pcm_{}.wav",
            &Uuid::new_v4().to_string()[..8]
        ));

        self.run_ffmpeg(&[
            "-y",
            "-i",
            &audio_path.to_string_lossy(),
            "-ar",
            "16000",
            "-ac",
            "1",
            "-f",
            "wav",
            &wav_path.to_string_lossy(),
        ])
        .await
        .context("Failed to decode audio for transcription")?;

        let samples = read_wav_samples(&wav_path)?;
        tracing::debug!(
            "Decoded {:.2} seconds of audio ({} samples)",
            samples.len() as f64 / WHISPER_SAMPLE_RATE as f64,
            samples.len()
        );

        Ok(samples)
    }

    /// Run ffmpeg with the given arguments, failing on a non-zero exit
    async fn run_ffmpeg(&self, args: &[&str]) -> Result<()> {
        let output = Command::new(&self.ffmpeg_path)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context("Failed to spawn ffmpeg")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("ffmpeg failed: {}", last_stderr_line(&stderr));
        }

        Ok(())
    }
}

/// Read PCM samples from a WAV file as normalized f32
fn read_wav_samples(wav_path: &Path) -> Result<Vec<f32>> {
    let reader = hound::WavReader::open(wav_path).context("Failed to open decoded WAV file")?;
    let spec = reader.spec();

    let max_value = (1i32 << (spec.bits_per_sample - 1)) as f32;
    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => reader
            .into_samples::<i32>()
            .filter_map(std::result::Result::ok)
            .map(|s| s as f32 / max_value)
            .collect(),
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .filter_map(std::result::Result::ok)
            .collect(),
    };

    Ok(samples)
}

/// ffmpeg writes multi-line banners to stderr; the last line carries the error
fn last_stderr_line(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_stderr_line() {
        let stderr = "ffmpeg version 6.0\nbuilt with gcc\n\nfile.mp4: No such file or directory\n";
        assert_eq!(
            last_stderr_line(stderr),
            "file.mp4: No such file or directory"
        );
        assert_eq!(last_stderr_line(""), "unknown error");
    }

    #[test]
    fn test_read_wav_samples_int() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: WHISPER_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.write_sample(i16::MAX).unwrap();
        writer.write_sample(i16::MIN).unwrap();
        writer.finalize().unwrap();

        let samples = read_wav_samples(&path).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], 0.0);
        assert!((samples[1] - 1.0).abs() < 1e-3);
        assert!((samples[2] + 1.0).abs() < 1e-6);
    }
}
