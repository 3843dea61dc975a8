//! Speaker tagging and voice assignment for script lines.

use crate::voice::{Prosody, VoiceId, VoiceMode, VoiceProfile};

use super::parser::Script;

/// A speaker annotation found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerTag {
    Male,
    Female,
}

impl SpeakerTag {
    /// Voice slot that speaks lines carrying this tag.
    pub fn voice(self) -> VoiceId {
        match self {
            SpeakerTag::Male => VoiceId::Primary,
            SpeakerTag::Female => VoiceId::Secondary,
        }
    }
}

/// Syntax used to mark the speaker of a line.
pub trait SpeakerMarkup {
    /// Split a leading speaker marker off a line.
    ///
    /// Returns the tag, if any, and the remaining text with surrounding
    /// whitespace removed. Lines without a marker come back unchanged.
    fn split_marker<'a>(&self, line: &'a str) -> (Option<SpeakerTag>, &'a str);
}

/// `[M]` / `[F]` prefix markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketMarkers;

impl SpeakerMarkup for BracketMarkers {
    fn split_marker<'a>(&self, line: &'a str) -> (Option<SpeakerTag>, &'a str) {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("[M]") {
            (Some(SpeakerTag::Male), rest.trim())
        } else if let Some(rest) = line.strip_prefix("[F]") {
            (Some(SpeakerTag::Female), rest.trim())
        } else {
            (None, line)
        }
    }
}

/// One unit of text to synthesize with a single voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub profile: VoiceProfile,
    pub sequence_index: usize,
}

/// Classify script lines using `[M]` / `[F]` markers.
pub fn classify(script: &Script, mode: VoiceMode, prosody: Prosody) -> Vec<Utterance> {
    classify_with(&BracketMarkers, script, mode, prosody)
}

/// Classify script lines with a custom marker syntax.
///
/// In [`VoiceMode::Single`] markers are not interpreted and every line goes
/// to the primary voice verbatim. Lines left empty after stripping a marker
/// are dropped; sequence indices count only the lines that survive.
pub fn classify_with<M: SpeakerMarkup + ?Sized>(
    markup: &M,
    script: &Script,
    mode: VoiceMode,
    prosody: Prosody,
) -> Vec<Utterance> {
    let mut utterances = Vec::with_capacity(script.len());

    for line in script.lines() {
        let (voice, text) = match mode {
            VoiceMode::Single => (VoiceId::Primary, line.as_str()),
            VoiceMode::Dual => {
                let (tag, text) = markup.split_marker(line);
                (tag.map_or(VoiceId::Primary, SpeakerTag::voice), text)
            }
        };

        if text.is_empty() {
            continue;
        }

        utterances.push(Utterance {
            text: text.to_string(),
            profile: VoiceProfile::new(voice, prosody),
            sequence_index: utterances.len(),
        });
    }

    utterances
}
