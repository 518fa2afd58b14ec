use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::transcribe::model::ModelSize;

#[derive(Parser)]
#[command(
    name = "clipscribe",
    about = "Clipscribe - Download, transcribe, and translate YouTube videos",
    version,
    long_about = "A CLI tool that downloads a YouTube video, extracts its audio track, transcribes the audio with a local Whisper model, optionally translates the transcript, and produces an audio-free copy of the video. Please comply with YouTube's terms and conditions - do not misuse this tool."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline for a video URL
    Process {
        /// YouTube video URL to process
        #[arg(value_name = "URL")]
        url: String,

        /// Language to translate the transcription into (optional)
        #[arg(short = 't', long, value_enum, default_value = "none", value_name = "LANG")]
        translate_to: TargetLanguage,

        /// Whisper model size to use (defaults to the configured size)
        #[arg(short, long, value_enum, value_name = "SIZE")]
        model: Option<ModelSize>,

        /// Working directory for pipeline artifacts (defaults to the current directory)
        #[arg(short, long, value_name = "DIR")]
        work_dir: Option<PathBuf>,

        /// Print the run outcome as JSON instead of the console summary
        #[arg(long)]
        json: bool,
    },

    /// Show or edit the configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },

    /// List supported translation target languages
    Languages,
}

/// User-selectable translation target; `None` disables translation.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetLanguage {
    None,
    En,
    Es,
    Fr,
    De,
    Zh,
    Hi,
    Ar,
    Ru,
    Ja,
    Pt,
}

impl TargetLanguage {
    /// ISO 639-1 code sent to the translation service, or `None` when
    /// translation is disabled.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            TargetLanguage::None => None,
            TargetLanguage::En => Some("en"),
            TargetLanguage::Es => Some("es"),
            TargetLanguage::Fr => Some("fr"),
            TargetLanguage::De => Some("de"),
            TargetLanguage::Zh => Some("zh"),
            TargetLanguage::Hi => Some("hi"),
            TargetLanguage::Ar => Some("ar"),
            TargetLanguage::Ru => Some("ru"),
            TargetLanguage::Ja => Some("ja"),
            TargetLanguage::Pt => Some("pt"),
        }
    }

    /// English display name for the language
    pub fn name(&self) -> &'static str {
        match self {
            TargetLanguage::None => "no translation",
            TargetLanguage::En => "English",
            TargetLanguage::Es => "Spanish",
            TargetLanguage::Fr => "French",
            TargetLanguage::De => "German",
            TargetLanguage::Zh => "Chinese",
            TargetLanguage::Hi => "Hindi",
            TargetLanguage::Ar => "Arabic",
            TargetLanguage::Ru => "Russian",
            TargetLanguage::Ja => "Japanese",
            TargetLanguage::Pt => "Portuguese",
        }
    }

    /// All targets that actually translate (everything except `None`)
    pub fn selectable() -> &'static [TargetLanguage] {
        &[
            TargetLanguage::En,
            TargetLanguage::Es,
            TargetLanguage::Fr,
            TargetLanguage::De,
            TargetLanguage::Zh,
            TargetLanguage::Hi,
            TargetLanguage::Ar,
            TargetLanguage::Ru,
            TargetLanguage::Ja,
            TargetLanguage::Pt,
        ]
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{}", code),
            None => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_target_language_codes() {
        assert_eq!(TargetLanguage::None.code(), None);
        assert_eq!(TargetLanguage::Es.code(), Some("es"));
        assert_eq!(TargetLanguage::Zh.code(), Some("zh"));
        assert_eq!(TargetLanguage::selectable().len(), 10);
        assert!(!TargetLanguage::selectable().contains(&TargetLanguage::None));
    }

    #[test]
    fn test_process_defaults_to_no_translation() {
        let cli = Cli::parse_from(["clipscribe", "process", "https://youtu.be/abc123"]);
        match cli.command {
            Commands::Process { translate_to, model, .. } => {
                assert_eq!(translate_to, TargetLanguage::None);
                assert!(model.is_none());
            }
            _ => panic!("expected process command"),
        }
    }
}
