//! CLI argument definitions and parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::backend::{DEFAULT_AUDIO_FORMAT, DEFAULT_BACKEND_URL};
use crate::engine::{PipelineError, RunConfig, SUGGESTED_FILE_NAME};
use crate::voice::{DEFAULT_PRIMARY_VOICE, DEFAULT_SECONDARY_VOICE, VoiceCatalog, VoiceMode};

use super::io::{InputError, ScriptSource};

/// Turn a script into a synthesized voiceover.
#[derive(Parser, Debug)]
#[command(name = "script-voiceover")]
#[command(about = "Turn a one- or two-voice script into a single MP3 voiceover")]
#[command(version)]
pub struct Args {
    /// Script text to speak
    #[arg(short, long, conflicts_with = "input")]
    pub text: Option<String>,

    /// Script file, plain text or .docx ("-" reads stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// "single" speaks every line with the primary voice, "dual" honors [M]/[F] markers
    #[arg(short, long, value_enum, default_value = "single")]
    pub mode: VoiceMode,

    /// Speaking rate adjustment in percent (-50 to 50)
    #[arg(
        short,
        long,
        default_value_t = 10,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(i32).range(-50..=50)
    )]
    pub rate: i32,

    /// Pitch adjustment in hertz (-20 to 20)
    #[arg(
        short,
        long,
        default_value_t = 0,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(i32).range(-20..=20)
    )]
    pub pitch: i32,

    /// Backend voice for [M] and unmarked lines
    #[arg(long, env = "VOICEOVER_PRIMARY_VOICE", default_value = DEFAULT_PRIMARY_VOICE)]
    pub primary_voice: String,

    /// Backend voice for [F] lines
    #[arg(long, env = "VOICEOVER_SECONDARY_VOICE", default_value = DEFAULT_SECONDARY_VOICE)]
    pub secondary_voice: String,

    /// Synthesis backend address
    #[arg(long, env = "VOICEOVER_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub host: String,

    /// Audio format name requested from the backend
    #[arg(long, env = "VOICEOVER_AUDIO_FORMAT", default_value = DEFAULT_AUDIO_FORMAT)]
    pub format: String,

    /// Time limit for each synthesis call, in seconds
    #[arg(long, env = "VOICEOVER_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Output audio file (overwritten if present)
    #[arg(short, long, default_value = SUGGESTED_FILE_NAME)]
    pub output: PathBuf,

    /// Print the classified utterances without synthesizing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the run configuration from the voice and prosody flags.
    pub fn run_config(&self) -> Result<RunConfig, PipelineError> {
        let catalog = VoiceCatalog::new(&self.primary_voice, &self.secondary_voice)?;
        let config = RunConfig::new(self.mode, self.rate, self.pitch, catalog)?;
        Ok(config.with_audio_format(self.format.trim()))
    }

    /// Per-call synthesis timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Where the script text comes from.
    pub fn source(&self) -> Result<ScriptSource, InputError> {
        match (&self.text, &self.input) {
            (Some(text), _) => Ok(ScriptSource::Inline(text.clone())),
            (None, Some(path)) if path.as_os_str() == "-" => Ok(ScriptSource::Stdin),
            (None, Some(path)) => Ok(ScriptSource::File(path.clone())),
            (None, None) => Err(InputError::NoInput),
        }
    }
}
