//! Backend request/response types.

use serde::Serialize;
use thiserror::Error;

use crate::voice::Prosody;

/// Default audio format requested from the backend.
pub const DEFAULT_AUDIO_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

/// Errors that can occur during a synthesis call.
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Synthesis timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Backend returned no audio")]
    EmptyStream,

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

/// One piece of audio as it arrived from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioChunk(Vec<u8>);

impl AudioChunk {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lazily produced audio for one utterance. Each chunk is yielded once.
pub type AudioStream = Box<dyn Iterator<Item = Result<AudioChunk, SynthesisError>> + Send>;

/// Request for speech synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesizeRequest {
    pub text: String,
    pub voice: String,
    pub rate: String,
    pub pitch: String,
    pub format: String,
}

impl SynthesizeRequest {
    /// Create a new synthesis request for a backend voice name.
    pub fn new(text: impl Into<String>, voice: impl Into<String>, prosody: &Prosody) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
            rate: prosody.rate_string(),
            pitch: prosody.pitch_string(),
            format: DEFAULT_AUDIO_FORMAT.to_string(),
        }
    }

    /// Set the requested audio format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}
