//! Failure taxonomy for the request pipeline.
//!
//! Each external collaborator fails in its own way. These types keep the
//! failure kinds distinguishable all the way up to the orchestrator, which
//! then decides how to render them for the caller.

use thiserror::Error;

/// The speech recognition engine could not produce text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognitionFailure {
    /// Audio was received but no speech could be made out.
    #[error("no speech detected")]
    NoSpeech,

    /// The recognition service itself failed (network, status, bad payload).
    #[error("speech recognition service error: {0}")]
    Service(String),
}

/// The generative-language backend call failed before producing a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    #[error("request failed: {0}")]
    Request(String),

    /// Non-success HTTP status (bad key, quota, unknown model).
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// The process launcher rejected a launch request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct LaunchError(pub String);

/// Rendering or persisting an audio artifact failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisFailure {
    #[error("nothing to synthesize")]
    EmptyText,

    #[error("speech engine error: {0}")]
    Engine(String),

    #[error("failed to store audio: {0}")]
    Storage(String),
}

/// Boundary validation errors. These are the only failures that stop a
/// request before it enters the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Tidak ada file audio yang dikirim.")]
    MissingAudio,

    #[error("Query kosong.")]
    EmptyQuery,

    #[error("Teks kosong.")]
    EmptyText,

    #[error("Nama aplikasi kosong.")]
    EmptyAppName,

    #[error("Nama file audio tidak valid.")]
    InvalidAudioName,
}

/// Start-up configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("failed to read command table {path}: {source}")]
    ReadCommands {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid command table {path}: {detail}")]
    ParseCommands { path: String, detail: String },
}
