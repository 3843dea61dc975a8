//! Voice identity, prosody, and the catalog mapping voices to backend names.

use std::fmt;

use clap::ValueEnum;
use thiserror::Error;

/// Default backend voice for [`VoiceId::Primary`].
pub const DEFAULT_PRIMARY_VOICE: &str = "hi-IN-MadhurNeural";

/// Default backend voice for [`VoiceId::Secondary`].
pub const DEFAULT_SECONDARY_VOICE: &str = "hi-IN-SwaraNeural";

/// Allowed speaking rate adjustment, in percent.
pub const RATE_RANGE: std::ops::RangeInclusive<i32> = -50..=50;

/// Allowed pitch adjustment, in hertz.
pub const PITCH_RANGE: std::ops::RangeInclusive<i32> = -20..=20;

/// Errors raised while building voice configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Rate adjustment {0}% is outside -50%..=+50%")]
    RateOutOfRange(i32),

    #[error("Pitch adjustment {0}Hz is outside -20Hz..=+20Hz")]
    PitchOutOfRange(i32),

    #[error("Voice name for {0} cannot be empty")]
    EmptyVoiceName(VoiceId),
}

/// Which of the two configured voices speaks an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceId {
    Primary,
    Secondary,
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceId::Primary => f.pad("primary"),
            VoiceId::Secondary => f.pad("secondary"),
        }
    }
}

/// Whether speaker markers are honored.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VoiceMode {
    /// Every line uses the primary voice.
    #[default]
    Single,

    /// `[M]` / `[F]` markers route lines to the primary / secondary voice.
    Dual,
}

/// Session-wide rate and pitch adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prosody {
    rate_percent: i32,
    pitch_hz: i32,
}

impl Prosody {
    /// Create a validated prosody setting.
    pub fn new(rate_percent: i32, pitch_hz: i32) -> Result<Self, VoiceError> {
        if !RATE_RANGE.contains(&rate_percent) {
            return Err(VoiceError::RateOutOfRange(rate_percent));
        }
        if !PITCH_RANGE.contains(&pitch_hz) {
            return Err(VoiceError::PitchOutOfRange(pitch_hz));
        }

        Ok(Self {
            rate_percent,
            pitch_hz,
        })
    }

    pub fn rate_percent(&self) -> i32 {
        self.rate_percent
    }

    pub fn pitch_hz(&self) -> i32 {
        self.pitch_hz
    }

    /// Rate as sent on the wire, e.g. `+10%`.
    pub fn rate_string(&self) -> String {
        format!("{:+}%", self.rate_percent)
    }

    /// Pitch as sent on the wire, e.g. `-5Hz`.
    pub fn pitch_string(&self) -> String {
        format!("{:+}Hz", self.pitch_hz)
    }
}

impl Default for Prosody {
    fn default() -> Self {
        Self {
            rate_percent: 10,
            pitch_hz: 0,
        }
    }
}

/// The full voice configuration applied to one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceProfile {
    pub voice: VoiceId,
    pub prosody: Prosody,
}

impl VoiceProfile {
    pub fn new(voice: VoiceId, prosody: Prosody) -> Self {
        Self { voice, prosody }
    }
}

/// Backend voice names for the two voice slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceCatalog {
    primary: String,
    secondary: String,
}

impl VoiceCatalog {
    /// Create a catalog from backend voice names.
    pub fn new(
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Result<Self, VoiceError> {
        let primary = primary.into().trim().to_string();
        let secondary = secondary.into().trim().to_string();

        if primary.is_empty() {
            return Err(VoiceError::EmptyVoiceName(VoiceId::Primary));
        }
        if secondary.is_empty() {
            return Err(VoiceError::EmptyVoiceName(VoiceId::Secondary));
        }

        Ok(Self { primary, secondary })
    }

    /// Backend name for a voice slot.
    pub fn resolve(&self, voice: VoiceId) -> &str {
        match voice {
            VoiceId::Primary => &self.primary,
            VoiceId::Secondary => &self.secondary,
        }
    }
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY_VOICE.to_string(),
            secondary: DEFAULT_SECONDARY_VOICE.to_string(),
        }
    }
}
