//! Script-to-audio pipeline.
//!
//! This module provides the controller that runs parsing, classification,
//! and sequential synthesis, the assembler that concatenates the returned
//! audio in order, and the progress and cancellation hooks around them.

mod assembler;
mod cancel;
mod pipeline;
mod progress;

pub use assembler::{AUDIO_MIME_TYPE, AudioAssembler, AudioBuffer, SUGGESTED_FILE_NAME};
pub use cancel::CancelToken;
pub use pipeline::{
    PipelineController, PipelineError, PipelineState, RunConfig, RunOutput, prepare_utterances,
};
pub use progress::{NoProgress, ProgressEvent, ProgressSink};
