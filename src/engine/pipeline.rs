//! Pipeline controller: script text in, one audio buffer out.

use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::{Backend, DEFAULT_AUDIO_FORMAT, SynthesisError};
use crate::script::{Utterance, classify, parse_script};
use crate::voice::{Prosody, VoiceCatalog, VoiceError, VoiceMode};

use super::assembler::{AudioAssembler, AudioBuffer};
use super::cancel::CancelToken;
use super::progress::{ProgressEvent, ProgressSink};

/// Errors that end a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Script contains no text to synthesize")]
    EmptyInput,

    #[error("Synthesis failed for utterance {sequence_index} ({text:?}): {source}")]
    UtteranceSynthesisFailed {
        sequence_index: usize,
        text: String,
        #[source]
        source: SynthesisError,
    },

    #[error("Run was cancelled")]
    Cancelled,

    #[error("Utterance {found} arrived while utterance {expected} was expected")]
    OutOfOrder { expected: usize, found: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] VoiceError),
}

/// Where a controller is in its current (or last) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Parsing,
    Classifying,
    Synthesizing,
    Completed,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::Parsing => "parsing",
            PipelineState::Classifying => "classifying",
            PipelineState::Synthesizing => "synthesizing",
            PipelineState::Completed => "completed",
            PipelineState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub voice_mode: VoiceMode,
    pub prosody: Prosody,
    pub catalog: VoiceCatalog,
    /// Output format name passed through to the backend.
    pub audio_format: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            voice_mode: VoiceMode::default(),
            prosody: Prosody::default(),
            catalog: VoiceCatalog::default(),
            audio_format: DEFAULT_AUDIO_FORMAT.to_string(),
        }
    }
}

impl RunConfig {
    /// Build a validated configuration from raw settings.
    pub fn new(
        voice_mode: VoiceMode,
        rate_percent: i32,
        pitch_hz: i32,
        catalog: VoiceCatalog,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            voice_mode,
            prosody: Prosody::new(rate_percent, pitch_hz)?,
            catalog,
            audio_format: DEFAULT_AUDIO_FORMAT.to_string(),
        })
    }

    /// Ask the backend for a different output format.
    pub fn with_audio_format(mut self, format: impl Into<String>) -> Self {
        self.audio_format = format.into();
        self
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunOutput {
    pub audio: AudioBuffer,
    pub utterance_count: usize,
    /// Wall time from the run request to completion.
    pub elapsed: Duration,
    /// Wall time spent in the synthesizing state.
    pub synthesis_elapsed: Duration,
}

/// Parse and classify a script without synthesizing it.
pub fn prepare_utterances(raw: &str, config: &RunConfig) -> Result<Vec<Utterance>, PipelineError> {
    let script = parse_script(raw);
    if script.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let utterances = classify(&script, config.voice_mode, config.prosody);
    if utterances.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    Ok(utterances)
}

/// Orchestrates parsing, classification, and sequential synthesis.
pub struct PipelineController<B: Backend> {
    backend: B,
    state: PipelineState,
}

impl<B: Backend> PipelineController<B> {
    /// Create a new controller in the [`PipelineState::Idle`] state.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Convert `raw` script text into one audio buffer.
    ///
    /// Utterances are synthesized one at a time in script order. The first
    /// failure aborts the run and any audio gathered so far is dropped.
    /// `progress` receives an event after every finished utterance.
    pub fn run(
        &mut self,
        raw: &str,
        config: &RunConfig,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<RunOutput, PipelineError> {
        let started = Instant::now();

        self.enter(PipelineState::Parsing);
        let script = parse_script(raw);
        if script.is_empty() {
            return self.fail(PipelineError::EmptyInput);
        }

        self.enter(PipelineState::Classifying);
        let utterances = classify(&script, config.voice_mode, config.prosody);
        if utterances.is_empty() {
            return self.fail(PipelineError::EmptyInput);
        }

        self.enter(PipelineState::Synthesizing);
        info!(
            lines = script.len(),
            utterances = utterances.len(),
            mode = ?config.voice_mode,
            format = %config.audio_format,
            "starting synthesis"
        );
        let synthesis_started = Instant::now();

        match self.synthesize_all(&utterances, config, progress, cancel, synthesis_started) {
            Ok(audio) => {
                self.enter(PipelineState::Completed);
                let output = RunOutput {
                    audio,
                    utterance_count: utterances.len(),
                    elapsed: started.elapsed(),
                    synthesis_elapsed: synthesis_started.elapsed(),
                };
                info!(
                    bytes = output.audio.len(),
                    elapsed_ms = output.elapsed.as_millis() as u64,
                    "synthesis completed"
                );
                Ok(output)
            }
            Err(e) => self.fail(e),
        }
    }

    fn synthesize_all(
        &self,
        utterances: &[Utterance],
        config: &RunConfig,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
        synthesis_started: Instant,
    ) -> Result<AudioBuffer, PipelineError> {
        let total = utterances.len();
        let mut assembler = AudioAssembler::new(&self.backend, config);

        for (done, utterance) in utterances.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }

            assembler.assemble(utterance, cancel)?;

            let event = ProgressEvent {
                completed: done + 1,
                total,
                elapsed: synthesis_started.elapsed(),
            };
            debug!(
                completed = event.completed,
                total,
                fraction = event.fraction(),
                "progress"
            );
            progress.on_progress(&event);
        }

        Ok(assembler.finish())
    }

    fn enter(&mut self, next: PipelineState) {
        debug!(from = %self.state, to = %next, "pipeline state change");
        self.state = next;
    }

    fn fail(&mut self, error: PipelineError) -> Result<RunOutput, PipelineError> {
        warn!(state = %self.state, error = %error, "pipeline run failed");
        self.enter(PipelineState::Failed);
        Err(error)
    }
}
