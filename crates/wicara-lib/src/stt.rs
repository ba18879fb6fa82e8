//! Speech-to-text client — uploads audio to a whisper-compatible server.

use async_trait::async_trait;
use tracing::debug;

use wicara_core::error::RecognitionFailure;
use wicara_core::types::Recognition;

/// External speech recognition engine.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Recognize speech in `audio`. `locale` is a BCP 47 tag such as `id-ID`.
    async fn recognize(&self, audio: &[u8], file_name: &str, locale: &str) -> Recognition;
}

/// Client for an OpenAI-compatible `/v1/audio/transcriptions` endpoint
/// (whisper-server, faster-whisper-server, ...).
pub struct WhisperRecognizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl WhisperRecognizer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: "whisper-1".into(),
        }
    }

    async fn transcribe(&self, audio: &[u8], file_name: &str, locale: &str) -> Result<String, String> {
        let part = reqwest::multipart::Part::bytes(audio.to_vec())
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))
            .map_err(|e| format!("mime error: {e}"))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("language", language_of(locale).to_string())
            .text("response_format", "json");

        let resp = self
            .client
            .post(format!("{}/v1/audio/transcriptions", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| format!("transcription request failed: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("transcription failed ({status}): {body}"));
        }

        let value: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| format!("invalid transcription response: {e}"))?;

        Ok(value
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string())
    }
}

#[async_trait]
impl SpeechRecognizer for WhisperRecognizer {
    async fn recognize(&self, audio: &[u8], file_name: &str, locale: &str) -> Recognition {
        if audio.is_empty() {
            return Err(RecognitionFailure::NoSpeech);
        }

        let text = self
            .transcribe(audio, file_name, locale)
            .await
            .map_err(RecognitionFailure::Service)?;

        debug!("stt: recognized {} chars", text.len());
        Ok(text)
    }
}

/// `id-ID` -> `id`
fn language_of(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "ogg" | "oga" => "audio/ogg",
        "webm" => "audio/webm",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        _ => "application/octet-stream",
    }
}
