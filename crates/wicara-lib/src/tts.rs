//! Text-to-speech client — Google Translate TTS, the backend gTTS uses.
//!
//! Pipeline:
//!
//! ```text
//! synthesize("text", "id") → split into ≤100-char chunks
//!     → GET translate_tts for each chunk (up to FETCH_CONCURRENCY in flight)
//!     → MP3 frames concatenated in chunk order
//! ```
//!
//! MPEG audio frames are self-delimiting, so back-to-back MP3 bodies play as
//! one stream.

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt, stream};
use tracing::debug;

use wicara_core::error::SynthesisFailure;
use wicara_core::text_prep::{MAX_SPEECH_CHUNK_CHARS, split_for_speech};

/// Chunk requests in flight at once.
const FETCH_CONCURRENCY: usize = 4;

/// External speech synthesis engine.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Render `text` in `language`, returning MP3 bytes.
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesisFailure>;
}

pub struct GoogleTranslateTts {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateTts {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        idx: usize,
        total: usize,
        language: &str,
    ) -> Result<Vec<u8>, SynthesisFailure> {
        let params = [
            ("ie", "UTF-8".to_string()),
            ("q", chunk.to_string()),
            ("tl", language.to_string()),
            ("total", total.to_string()),
            ("idx", idx.to_string()),
            ("textlen", chunk.chars().count().to_string()),
            ("client", "tw-ob".to_string()),
        ];

        let resp = self
            .client
            .get(format!("{}/translate_tts", self.base_url))
            .query(&params)
            .send()
            .await
            .map_err(|e| SynthesisFailure::Engine(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SynthesisFailure::Engine(format!(
                "chunk {idx}/{total} returned {status}"
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| SynthesisFailure::Engine(format!("response read error: {e}")))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechEngine for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesisFailure> {
        let chunks = split_for_speech(text, MAX_SPEECH_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SynthesisFailure::EmptyText);
        }

        let total = chunks.len();
        debug!("tts: {total} chunks ({language})");

        let parts: Vec<Vec<u8>> = stream::iter(chunks.into_iter().enumerate())
            .map(|(idx, chunk)| async move { self.fetch_chunk(&chunk, idx, total, language).await })
            .buffered(FETCH_CONCURRENCY)
            .try_collect()
            .await?;

        Ok(parts.concat())
    }
}
