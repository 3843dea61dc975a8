//! Voice configuration shared by the classifier and the synthesis backend.
//!
//! A run picks between two voice slots per utterance and applies one
//! session-wide prosody setting to all of them.

mod profile;

pub use profile::{
    DEFAULT_PRIMARY_VOICE, DEFAULT_SECONDARY_VOICE, PITCH_RANGE, Prosody, RATE_RANGE,
    VoiceCatalog, VoiceError, VoiceId, VoiceMode, VoiceProfile,
};

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // Prosody tests
    // ===========================================

    #[test]
    fn test_prosody_default_rate_and_pitch() {
        let prosody = Prosody::default();
        assert_eq!(prosody.rate_percent(), 10);
        assert_eq!(prosody.pitch_hz(), 0);
    }

    #[test]
    fn test_prosody_accepts_range_bounds() {
        assert!(Prosody::new(-50, -20).is_ok());
        assert!(Prosody::new(50, 20).is_ok());
    }

    #[test]
    fn test_prosody_rejects_rate_out_of_range() {
        let result = Prosody::new(51, 0);
        assert_eq!(result.unwrap_err(), VoiceError::RateOutOfRange(51));

        let result = Prosody::new(-51, 0);
        assert_eq!(result.unwrap_err(), VoiceError::RateOutOfRange(-51));
    }

    #[test]
    fn test_prosody_rejects_pitch_out_of_range() {
        let result = Prosody::new(0, 21);
        assert_eq!(result.unwrap_err(), VoiceError::PitchOutOfRange(21));
    }

    #[test]
    fn test_prosody_wire_strings_are_signed() {
        let prosody = Prosody::new(10, 0).unwrap();
        assert_eq!(prosody.rate_string(), "+10%");
        assert_eq!(prosody.pitch_string(), "+0Hz");

        let prosody = Prosody::new(-25, -7).unwrap();
        assert_eq!(prosody.rate_string(), "-25%");
        assert_eq!(prosody.pitch_string(), "-7Hz");
    }

    // ===========================================
    // VoiceCatalog tests
    // ===========================================

    #[test]
    fn test_catalog_default_voices() {
        let catalog = VoiceCatalog::default();
        assert_eq!(catalog.resolve(VoiceId::Primary), "hi-IN-MadhurNeural");
        assert_eq!(catalog.resolve(VoiceId::Secondary), "hi-IN-SwaraNeural");
    }

    #[test]
    fn test_catalog_custom_voices_are_trimmed() {
        let catalog = VoiceCatalog::new("  en-US-GuyNeural ", "en-US-JennyNeural").unwrap();
        assert_eq!(catalog.resolve(VoiceId::Primary), "en-US-GuyNeural");
        assert_eq!(catalog.resolve(VoiceId::Secondary), "en-US-JennyNeural");
    }

    #[test]
    fn test_catalog_rejects_empty_names() {
        let result = VoiceCatalog::new("", "en-US-JennyNeural");
        assert_eq!(
            result.unwrap_err(),
            VoiceError::EmptyVoiceName(VoiceId::Primary)
        );

        let result = VoiceCatalog::new("en-US-GuyNeural", "   ");
        assert_eq!(
            result.unwrap_err(),
            VoiceError::EmptyVoiceName(VoiceId::Secondary)
        );
    }

    #[test]
    fn test_voice_mode_default_is_single() {
        assert_eq!(VoiceMode::default(), VoiceMode::Single);
    }
}
