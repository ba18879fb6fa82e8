//! Request orchestrator — normalize → classify → execute-or-respond → synthesize.
//!
//! Each request walks the stages below once, in order:
//!
//! ```text
//! Received → Normalizing → Classifying → Executing  ┐
//!                                     └→ Responding ┴→ Synthesizing → Done
//! ```
//!
//! Collaborator failures never abort a request: whatever text results (an
//! answer, a command confirmation, or a description of what went wrong) is
//! synthesized and returned. Only boundary validation short-circuits, before
//! `Normalizing`.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument};

use wicara_core::error::{ConfigError, RequestError};
use wicara_core::intent::classify;
use wicara_core::transcript::{normalize, normalize_text};
use wicara_core::types::{
    AudioRef, Intent, NormalizedText, Reply, ResponsePayload, Utterance, VoiceQueryPayload,
};

use crate::artifacts::AudioStore;
use crate::commands::CommandExecutor;
use crate::config::AssistantConfig;
use crate::launcher::ProcessLauncher;
use crate::llm::GeminiClient;
use crate::responder::QueryResponder;
use crate::response_log::ResponseLog;
use crate::stt::{SpeechRecognizer, WhisperRecognizer};
use crate::synthesizer::Synthesizer;
use crate::tts::GoogleTranslateTts;

/// Pipeline stages, in the only order they may be entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Received,
    Normalizing,
    Classifying,
    Executing,
    Responding,
    Synthesizing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Normalizing => "normalizing",
            Self::Classifying => "classifying",
            Self::Executing => "executing",
            Self::Responding => "responding",
            Self::Synthesizing => "synthesizing",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Forward-only stage cursor for one request.
#[derive(Debug)]
struct Progress {
    stage: Stage,
    visited: Vec<Stage>,
}

impl Progress {
    fn new() -> Self {
        Self {
            stage: Stage::Received,
            visited: vec![Stage::Received],
        }
    }

    fn enter(&mut self, next: Stage) {
        debug_assert!(next > self.stage, "stage {next} after {}", self.stage);
        debug!("pipeline: {} → {next}", self.stage);
        self.stage = next;
        self.visited.push(next);
    }
}

/// Everything one request produced.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub transcript: NormalizedText,
    pub intent: Option<Intent>,
    pub reply: Reply,
    pub audio: AudioRef,
    pub stages: Vec<Stage>,
}

impl Exchange {
    pub fn payload(&self) -> ResponsePayload {
        ResponsePayload {
            text: self.reply.text(),
            audio_ref: self.audio.to_wire(),
        }
    }

    pub fn voice_payload(&self) -> VoiceQueryPayload {
        VoiceQueryPayload {
            transcript: self.transcript.as_text().unwrap_or_default().to_string(),
            payload: self.payload(),
        }
    }
}

#[derive(Clone)]
pub struct Orchestrator {
    recognizer: Arc<dyn SpeechRecognizer>,
    executor: CommandExecutor,
    responder: QueryResponder,
    synthesizer: Synthesizer,
    locale: String,
}

impl Orchestrator {
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        executor: CommandExecutor,
        responder: QueryResponder,
        synthesizer: Synthesizer,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            recognizer,
            executor,
            responder,
            synthesizer,
            locale: locale.into(),
        }
    }

    /// Wire up the shipped collaborator clients.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let table = Arc::new(config.command_table()?);

        let executor = CommandExecutor::new(
            table,
            Arc::new(ProcessLauncher),
            ResponseLog::new(&config.log_path),
        );
        let responder = QueryResponder::new(Arc::new(GeminiClient::new(
            &config.gemini_endpoint,
            &config.gemini_model,
            &config.gemini_api_key,
        )));
        let synthesizer = Synthesizer::new(
            Arc::new(GoogleTranslateTts::new(&config.tts_url)),
            AudioStore::new(&config.audio_dir),
            &config.language,
        );

        Ok(Self::new(
            Arc::new(WhisperRecognizer::new(&config.stt_url)),
            executor,
            responder,
            synthesizer,
            &config.locale,
        ))
    }

    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }

    pub fn store(&self) -> &AudioStore {
        self.synthesizer.store()
    }

    /// Transcribe audio without acting on it.
    pub async fn transcribe(
        &self,
        audio: &[u8],
        file_name: &str,
    ) -> Result<NormalizedText, RequestError> {
        if audio.is_empty() {
            return Err(RequestError::MissingAudio);
        }
        let recognition = self.recognizer.recognize(audio, file_name, &self.locale).await;
        Ok(normalize(recognition))
    }

    /// Run the full pipeline for one utterance.
    #[instrument(skip_all)]
    pub async fn handle(&self, utterance: Utterance) -> Result<Exchange, RequestError> {
        validate(&utterance)?;
        let mut progress = Progress::new();

        progress.enter(Stage::Normalizing);
        let transcript = match utterance {
            Utterance::Text(text) => normalize_text(&text),
            Utterance::Audio { bytes, file_name } => {
                let recognition = self.recognizer.recognize(&bytes, &file_name, &self.locale).await;
                normalize(recognition)
            }
        };

        let (intent, reply) = match transcript.as_text() {
            Some(text) => {
                progress.enter(Stage::Classifying);
                let intent = classify(text);
                let reply = self.dispatch(&intent, &mut progress).await;
                (Some(intent), reply)
            }
            None => (None, Reply::Unrecognized(transcript.clone())),
        };

        Ok(self.finish(transcript, intent, reply, progress).await)
    }

    /// Launch an application by name, skipping classification.
    #[instrument(skip_all)]
    pub async fn open_application(&self, app_name: &str) -> Result<Exchange, RequestError> {
        let name = app_name.trim();
        if name.is_empty() {
            return Err(RequestError::EmptyAppName);
        }
        let mut progress = Progress::new();

        let intent = Intent::Command {
            target_name: name.to_string(),
        };
        let reply = self.dispatch(&intent, &mut progress).await;
        let transcript = NormalizedText::Text(name.to_string());

        Ok(self.finish(transcript, Some(intent), reply, progress).await)
    }

    /// Synthesize caller-supplied text directly.
    pub async fn speak(&self, text: &str, language: Option<&str>) -> Result<AudioRef, RequestError> {
        if text.trim().is_empty() {
            return Err(RequestError::EmptyText);
        }
        Ok(self.synthesizer.synthesize(text, language).await)
    }

    async fn dispatch(&self, intent: &Intent, progress: &mut Progress) -> Reply {
        match intent {
            Intent::Command { target_name } => {
                progress.enter(Stage::Executing);
                Reply::Action(self.executor.execute(target_name))
            }
            Intent::Query { text } => {
                progress.enter(Stage::Responding);
                Reply::Answer(self.responder.respond(text).await)
            }
        }
    }

    async fn finish(
        &self,
        transcript: NormalizedText,
        intent: Option<Intent>,
        reply: Reply,
        mut progress: Progress,
    ) -> Exchange {
        progress.enter(Stage::Synthesizing);
        let audio = self.synthesizer.synthesize(&reply.text(), None).await;
        progress.enter(Stage::Done);

        Exchange {
            transcript,
            intent,
            reply,
            audio,
            stages: progress.visited,
        }
    }
}

fn validate(utterance: &Utterance) -> Result<(), RequestError> {
    match utterance {
        Utterance::Text(text) if text.trim().is_empty() => Err(RequestError::EmptyQuery),
        Utterance::Audio { bytes, .. } if bytes.is_empty() => Err(RequestError::MissingAudio),
        _ => Ok(()),
    }
}
