//! Shared types for the wicara request pipeline.
//!
//! Everything here is plain data: derived once, never mutated. The engine in
//! wicara-lib produces these values; the HTTP layer only renders them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationFailure, LaunchError, RecognitionFailure, SynthesisFailure};

// ─── User-visible renderings ───────────────────────────────────────────────

/// Reply when recognition produced no usable speech.
pub const UNINTELLIGIBLE_REPLY: &str = "Maaf, aku tidak mengerti apa yang Anda ucapkan.";

/// Reply when the backend answered without a usable candidate.
pub const NO_ANSWER_REPLY: &str = "Maaf, saya tidak dapat menemukan jawaban.";

/// Default synthesis language (gTTS-style code).
pub const DEFAULT_LANGUAGE: &str = "id";

/// Default recognition locale.
pub const DEFAULT_LOCALE: &str = "id-ID";

// ─── Input side ────────────────────────────────────────────────────────────

/// One unit of caller-submitted input.
#[derive(Debug, Clone)]
pub enum Utterance {
    Text(String),
    Audio { bytes: Vec<u8>, file_name: String },
}

/// What the speech recognition engine reported.
pub type Recognition = Result<String, RecognitionFailure>;

/// Recognized text after normalization, or a sentinel for a failed
/// recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedText {
    Text(String),
    Unintelligible,
    ServiceUnavailable(String),
}

impl NormalizedText {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Text to show the caller: the transcript, or the sentinel's message.
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(t) => t.clone(),
            Self::Unintelligible => UNINTELLIGIBLE_REPLY.to_string(),
            Self::ServiceUnavailable(detail) => {
                format!("Kesalahan layanan Speech-to-Text: {detail}")
            }
        }
    }
}

/// Classified purpose of an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Command { target_name: String },
    Query { text: String },
}

// ─── Outcomes ──────────────────────────────────────────────────────────────

/// Outcome of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Launched(String),
    NotFound(String),
    LaunchFailed(String, LaunchError),
}

impl ActionResult {
    /// Spoken confirmation for the caller.
    pub fn reply_text(&self) -> String {
        match self {
            Self::Launched(n) => format!("Membuka {n}."),
            Self::NotFound(n) => format!("Aplikasi {n} tidak ditemukan."),
            Self::LaunchFailed(n, e) => format!("Gagal membuka {n}: {e}"),
        }
    }
}

/// Single-line form used by the response log.
impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launched(n) => write!(f, "launched {n}"),
            Self::NotFound(n) => write!(f, "not_found {n}"),
            Self::LaunchFailed(n, e) => {
                // Keep the entry on one line whatever the OS error says.
                let cause = e.0.replace(['\n', '\r'], " ");
                write!(f, "launch_failed {n}: {cause}")
            }
        }
    }
}

/// Answer produced for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedAnswer {
    Candidate(String),
    Fallback,
    Failed(GenerationFailure),
}

impl GeneratedAnswer {
    pub fn text(&self) -> String {
        match self {
            Self::Candidate(t) => t.clone(),
            Self::Fallback => NO_ANSWER_REPLY.to_string(),
            Self::Failed(e) => format!("Kesalahan saat memproses query: {e}"),
        }
    }
}

/// The text half of a response, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Action(ActionResult),
    Answer(GeneratedAnswer),
    Unrecognized(NormalizedText),
}

impl Reply {
    pub fn text(&self) -> String {
        match self {
            Self::Action(r) => r.reply_text(),
            Self::Answer(a) => a.text(),
            Self::Unrecognized(n) => n.display_text(),
        }
    }

    /// Whether any collaborator failed while producing this reply.
    pub fn is_degraded(&self) -> bool {
        match self {
            Self::Action(ActionResult::Launched(_)) => false,
            Self::Action(_) => true,
            Self::Answer(GeneratedAnswer::Candidate(_)) => false,
            Self::Answer(_) => true,
            Self::Unrecognized(_) => true,
        }
    }
}

/// A persisted audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    /// File name, unique within the artifact directory.
    pub name: String,
    /// Location the file was written to, as reported to callers.
    pub path: String,
    /// The text the audio renders.
    pub text: String,
}

/// Reference to the audio half of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioRef {
    Artifact(AudioArtifact),
    Failed(SynthesisFailure),
}

impl AudioRef {
    /// Wire form: the artifact path, or an error marker in its place.
    pub fn to_wire(&self) -> String {
        match self {
            Self::Artifact(a) => a.path.clone(),
            Self::Failed(e) => format!("Kesalahan Text-to-Speech: {e}"),
        }
    }

    pub fn artifact(&self) -> Option<&AudioArtifact> {
        match self {
            Self::Artifact(a) => Some(a),
            Self::Failed(_) => None,
        }
    }
}

// ─── Wire payloads ─────────────────────────────────────────────────────────

/// Result of a text or command request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    #[serde(rename = "response")]
    pub text: String,
    #[serde(rename = "audio_path")]
    pub audio_ref: String,
}

/// Result of a spoken request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceQueryPayload {
    pub transcript: String,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

/// Result of a bare transcription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptPayload {
    pub text: String,
}

/// Result of a direct text-to-speech request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechPayload {
    pub audio_path: String,
}

/// Body of every 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}
