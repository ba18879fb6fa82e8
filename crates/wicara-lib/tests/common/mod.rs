//! Shared test utilities

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wicara_lib::artifacts::AudioStore;
use wicara_lib::commands::CommandExecutor;
use wicara_lib::config::CommandTable;
use wicara_lib::launcher::Launcher;
use wicara_lib::llm::LanguageModel;
use wicara_lib::orchestrator::Orchestrator;
use wicara_lib::responder::QueryResponder;
use wicara_lib::response_log::ResponseLog;
use wicara_lib::stt::SpeechRecognizer;
use wicara_lib::synthesizer::Synthesizer;
use wicara_lib::tts::SpeechEngine;
use wicara_lib::wicara_core::error::{
    GenerationFailure, LaunchError, RecognitionFailure, SynthesisFailure,
};
use wicara_lib::wicara_core::types::Recognition;

pub const BOUNDARY: &str = "wicara-test-boundary";

pub struct StubRecognizer(pub Recognition);

#[async_trait]
impl SpeechRecognizer for StubRecognizer {
    async fn recognize(&self, _: &[u8], _: &str, _: &str) -> Recognition {
        self.0.clone()
    }
}

pub struct StubModel(pub Result<serde_json::Value, GenerationFailure>);

#[async_trait]
impl LanguageModel for StubModel {
    async fn generate(&self, _: &str) -> Result<serde_json::Value, GenerationFailure> {
        self.0.clone()
    }
}

#[derive(Default)]
pub struct StubLauncher {
    pub launched: Mutex<Vec<String>>,
}

impl Launcher for StubLauncher {
    fn launch(&self, program: &str) -> Result<(), LaunchError> {
        self.launched.lock().unwrap().push(program.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct StubEngine {
    pub calls: Mutex<usize>,
    pub fail: bool,
}

#[async_trait]
impl SpeechEngine for StubEngine {
    async fn synthesize(&self, text: &str, _: &str) -> Result<Vec<u8>, SynthesisFailure> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(SynthesisFailure::Engine("tts offline".into()));
        }
        Ok(format!("ID3{text}").into_bytes())
    }
}

/// Everything a router test needs to inspect afterwards.
pub struct TestApp {
    pub router: axum::Router,
    pub launcher: Arc<StubLauncher>,
    pub engine: Arc<StubEngine>,
    pub dir: tempfile::TempDir,
}

pub struct Stubs {
    pub recognition: Recognition,
    pub model: Result<serde_json::Value, GenerationFailure>,
    pub engine: StubEngine,
}

impl Default for Stubs {
    fn default() -> Self {
        Self {
            recognition: Ok("Buka Calculator".into()),
            model: Ok(candidate("Jakarta adalah ibu kota Indonesia.")),
            engine: StubEngine::default(),
        }
    }
}

pub fn candidate(text: &str) -> serde_json::Value {
    serde_json::json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
}

pub fn no_speech() -> Recognition {
    Err(RecognitionFailure::NoSpeech)
}

/// Build the router over stub collaborators and a temp directory.
pub fn test_app(stubs: Stubs) -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let launcher = Arc::new(StubLauncher::default());
    let engine = Arc::new(stubs.engine);

    let orchestrator = Orchestrator::new(
        Arc::new(StubRecognizer(stubs.recognition)),
        CommandExecutor::new(
            Arc::new(CommandTable::from_pairs([("calculator", "calc")])),
            launcher.clone(),
            ResponseLog::new(dir.path().join("responses.log")),
        ),
        QueryResponder::new(Arc::new(StubModel(stubs.model))),
        Synthesizer::new(
            engine.clone(),
            AudioStore::new(dir.path().join("static")),
            "id",
        ),
        "id-ID",
    );

    TestApp {
        router: wicara_lib::server::router(orchestrator),
        launcher,
        engine,
        dir,
    }
}

/// Hand-rolled multipart body with a single file field.
pub fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: audio/wav\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}
