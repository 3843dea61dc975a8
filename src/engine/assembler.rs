//! Per-utterance synthesis and ordered concatenation of audio.

use tracing::debug;

use crate::backend::{Backend, SynthesisError, SynthesizeRequest};
use crate::script::Utterance;

use super::cancel::CancelToken;
use super::pipeline::{PipelineError, RunConfig};

/// MIME type of the produced audio.
pub const AUDIO_MIME_TYPE: &str = "audio/mp3";

/// File name suggested to consumers of the produced audio.
pub const SUGGESTED_FILE_NAME: &str = "voiceover.mp3";

/// Concatenated audio of every utterance, in sequence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioBuffer {
    bytes: Vec<u8>,
}

impl AudioBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        AUDIO_MIME_TYPE
    }

    pub fn suggested_file_name(&self) -> &'static str {
        SUGGESTED_FILE_NAME
    }
}

/// Drives the backend for each utterance and appends its audio.
///
/// Utterances must be fed in strictly increasing `sequence_index` order
/// starting at zero; anything else is rejected rather than reordered.
pub struct AudioAssembler<'a, B: Backend + ?Sized> {
    backend: &'a B,
    config: &'a RunConfig,
    buffer: AudioBuffer,
    next_index: usize,
}

impl<'a, B: Backend + ?Sized> AudioAssembler<'a, B> {
    pub fn new(backend: &'a B, config: &'a RunConfig) -> Self {
        Self {
            backend,
            config,
            buffer: AudioBuffer::default(),
            next_index: 0,
        }
    }

    /// Synthesize one utterance and append its audio to the buffer.
    ///
    /// Returns the number of bytes appended. On error nothing from this
    /// utterance reaches the buffer.
    pub fn assemble(
        &mut self,
        utterance: &Utterance,
        cancel: &CancelToken,
    ) -> Result<usize, PipelineError> {
        if utterance.sequence_index != self.next_index {
            return Err(PipelineError::OutOfOrder {
                expected: self.next_index,
                found: utterance.sequence_index,
            });
        }

        let audio = self.synthesize(utterance, cancel)?;
        let appended = audio.len();
        self.buffer.bytes.extend_from_slice(&audio);
        self.next_index += 1;

        Ok(appended)
    }

    /// Hand over the assembled audio.
    pub fn finish(self) -> AudioBuffer {
        self.buffer
    }

    fn synthesize(
        &self,
        utterance: &Utterance,
        cancel: &CancelToken,
    ) -> Result<Vec<u8>, PipelineError> {
        let failed = |source: SynthesisError| PipelineError::UtteranceSynthesisFailed {
            sequence_index: utterance.sequence_index,
            text: utterance.text.clone(),
            source,
        };

        let profile = &utterance.profile;
        let request = SynthesizeRequest::new(
            utterance.text.as_str(),
            self.config.catalog.resolve(profile.voice),
            &profile.prosody,
        )
        .with_format(self.config.audio_format.as_str());

        let stream = self.backend.synthesize(&request).map_err(failed)?;

        let mut audio = Vec::new();
        let mut chunks = 0usize;
        for chunk in stream {
            let chunk = chunk.map_err(failed)?;
            audio.extend_from_slice(chunk.as_bytes());
            chunks += 1;

            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }
        }

        if audio.is_empty() {
            return Err(failed(SynthesisError::EmptyStream));
        }

        debug!(
            sequence_index = utterance.sequence_index,
            voice = %profile.voice,
            chunks,
            bytes = audio.len(),
            "utterance synthesized"
        );

        Ok(audio)
    }
}
