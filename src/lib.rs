//! script-voiceover: turn a script into one synthesized voiceover.
//!
//! A script is split into lines, each line is assigned one of two voices
//! from `[M]` / `[F]` markers, and every line is synthesized in order by a
//! streaming speech backend. The audio is concatenated into a single MP3.

pub mod backend;
pub mod cli;
pub mod engine;
pub mod script;
pub mod voice;
