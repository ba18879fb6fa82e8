//! Speech synthesizer adapter — text in, stored audio artifact out.

use std::sync::Arc;

use tracing::{debug, warn};

use wicara_core::error::SynthesisFailure;
use wicara_core::text_prep::clean_text_for_speech;
use wicara_core::types::{AudioArtifact, AudioRef};

use crate::artifacts::AudioStore;
use crate::tts::SpeechEngine;

#[derive(Clone)]
pub struct Synthesizer {
    engine: Arc<dyn SpeechEngine>,
    store: AudioStore,
    default_language: String,
}

impl Synthesizer {
    pub fn new(engine: Arc<dyn SpeechEngine>, store: AudioStore, default_language: impl Into<String>) -> Self {
        Self {
            engine,
            store,
            default_language: default_language.into(),
        }
    }

    pub fn store(&self) -> &AudioStore {
        &self.store
    }

    /// Render `text` to a new artifact. One attempt; failures come back as
    /// [`AudioRef::Failed`], never as an error.
    pub async fn synthesize(&self, text: &str, language: Option<&str>) -> AudioRef {
        let language = language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(self.default_language.as_str());

        match self.render(text, language).await {
            Ok(artifact) => {
                debug!("synth: wrote {}", artifact.path);
                AudioRef::Artifact(artifact)
            }
            Err(e) => {
                warn!("synth: {e}");
                AudioRef::Failed(e)
            }
        }
    }

    async fn render(&self, text: &str, language: &str) -> Result<AudioArtifact, SynthesisFailure> {
        let spoken = clean_text_for_speech(text);
        if spoken.is_empty() {
            return Err(SynthesisFailure::EmptyText);
        }

        let audio = self.engine.synthesize(&spoken, language).await?;
        let (name, path) = self
            .store
            .store(&audio)
            .await
            .map_err(|e| SynthesisFailure::Storage(e.to_string()))?;

        Ok(AudioArtifact {
            name,
            path: path.to_string_lossy().replace('\\', "/"),
            text: text.to_string(),
        })
    }
}
