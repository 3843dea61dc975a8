//! Script parsing and speaker classification.
//!
//! Raw text is split into lines by the parser, then each line is tagged with
//! a voice by the classifier. Marker syntax lives behind [`SpeakerMarkup`] so
//! it can change without touching synthesis.

mod classifier;
mod parser;

pub use classifier::{
    BracketMarkers, SpeakerMarkup, SpeakerTag, Utterance, classify, classify_with,
};
pub use parser::{Script, parse_script};
