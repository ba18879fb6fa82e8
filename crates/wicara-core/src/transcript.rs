//! Transcript normalization.
//!
//! Pure functions, no I/O. Turns whatever the recognition engine reported
//! into [`NormalizedText`].

use crate::error::RecognitionFailure;
use crate::types::{NormalizedText, Recognition};

/// Markers some whisper builds emit for silent input.
const BLANK_MARKERS: &[&str] = &["[BLANK_AUDIO]", "[blank_audio]", "(silence)"];

/// Normalize a recognition result.
///
/// Empty or marker-only text counts as unintelligible, same as an explicit
/// no-speech report from the engine.
pub fn normalize(recognition: Recognition) -> NormalizedText {
    match recognition {
        Ok(text) => normalize_text(&text),
        Err(RecognitionFailure::NoSpeech) => NormalizedText::Unintelligible,
        Err(RecognitionFailure::Service(detail)) => NormalizedText::ServiceUnavailable(detail),
    }
}

/// Lowercase and trim already-recognized text.
pub fn normalize_text(text: &str) -> NormalizedText {
    let mut cleaned = text.to_string();
    for marker in BLANK_MARKERS {
        cleaned = cleaned.replace(marker, "");
    }
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || !cleaned.chars().any(char::is_alphanumeric) {
        return NormalizedText::Unintelligible;
    }
    NormalizedText::Text(cleaned.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(
            normalize(Ok("  Buka Calculator \n".into())),
            NormalizedText::Text("buka calculator".into())
        );
    }

    #[test]
    fn empty_text_is_unintelligible() {
        assert_eq!(normalize(Ok(String::new())), NormalizedText::Unintelligible);
        assert_eq!(normalize(Ok("   ".into())), NormalizedText::Unintelligible);
    }

    #[test]
    fn punctuation_only_is_unintelligible() {
        assert_eq!(normalize(Ok(" ... ".into())), NormalizedText::Unintelligible);
    }

    #[test]
    fn blank_audio_marker_is_unintelligible() {
        assert_eq!(
            normalize(Ok("[BLANK_AUDIO]".into())),
            NormalizedText::Unintelligible
        );
    }

    #[test]
    fn no_speech_is_unintelligible() {
        assert_eq!(
            normalize(Err(RecognitionFailure::NoSpeech)),
            NormalizedText::Unintelligible
        );
    }

    #[test]
    fn service_error_keeps_detail() {
        assert_eq!(
            normalize(Err(RecognitionFailure::Service("timeout".into()))),
            NormalizedText::ServiceUnavailable("timeout".into())
        );
    }

    #[test]
    fn keeps_non_ascii_text() {
        assert_eq!(
            normalize_text("Apa Kabar, DUNIA?"),
            NormalizedText::Text("apa kabar, dunia?".into())
        );
    }
}
