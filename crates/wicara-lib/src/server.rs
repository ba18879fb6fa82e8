//! HTTP API for the wicara assistant.
//!
//! Routes mirror the browser client's expectations. CORS-permissive so a page
//! served from elsewhere can call it.

use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use wicara_core::error::RequestError;
use wicara_core::types::{
    ErrorPayload, ResponsePayload, SpeechPayload, TranscriptPayload, Utterance, VoiceQueryPayload,
};

use crate::orchestrator::Orchestrator;

/// Largest accepted upload.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Multipart field carrying the recording.
const AUDIO_FIELD: &str = "audio";

/// Build the axum router with a shared [`Orchestrator`].
pub fn router(orchestrator: Orchestrator) -> Router {
    Router::new()
        .route("/speech-to-text", post(speech_to_text))
        .route("/voice-query", post(voice_query))
        .route("/process-query", post(process_query))
        .route("/open-application", post(open_application))
        .route("/text-to-speech", post(text_to_speech))
        .route("/get-audio/{filename}", get(get_audio))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(orchestrator)
}

// ─── Errors ────────────────────────────────────────────────────────────────

enum ApiError {
    Request(RequestError),
    Malformed(String),
    NotFound(String),
}

impl From<RequestError> for ApiError {
    fn from(e: RequestError) -> Self {
        Self::Request(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::Malformed(e.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(_: MultipartRejection) -> Self {
        Self::Request(RequestError::MissingAudio)
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        Self::Malformed(e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::Request(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Malformed(detail) => (StatusCode::BAD_REQUEST, detail),
            Self::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
        };
        (status, Json(ErrorPayload { error })).into_response()
    }
}

// ─── Requests ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct QueryRequest {
    #[serde(default)]
    query: String,
}

#[derive(Deserialize)]
struct OpenApplicationRequest {
    #[serde(default)]
    app_name: String,
}

#[derive(Deserialize)]
struct SpeechRequest {
    #[serde(default)]
    text: String,
    #[serde(default)]
    language: Option<String>,
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    commands: usize,
}

// ─── Handlers ──────────────────────────────────────────────────────────────

async fn speech_to_text(
    State(orchestrator): State<Orchestrator>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptPayload>, ApiError> {
    let (bytes, file_name) = read_audio(multipart?).await?;
    let transcript = orchestrator.transcribe(&bytes, &file_name).await?;
    Ok(Json(TranscriptPayload {
        text: transcript.display_text(),
    }))
}

async fn voice_query(
    State(orchestrator): State<Orchestrator>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VoiceQueryPayload>, ApiError> {
    let (bytes, file_name) = read_audio(multipart?).await?;
    let exchange = orchestrator
        .handle(Utterance::Audio { bytes, file_name })
        .await?;
    Ok(Json(exchange.voice_payload()))
}

async fn process_query(
    State(orchestrator): State<Orchestrator>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<ResponsePayload>, ApiError> {
    let Json(req) = body?;
    let exchange = orchestrator.handle(Utterance::Text(req.query)).await?;
    Ok(Json(exchange.payload()))
}

async fn open_application(
    State(orchestrator): State<Orchestrator>,
    body: Result<Json<OpenApplicationRequest>, JsonRejection>,
) -> Result<Json<ResponsePayload>, ApiError> {
    let Json(req) = body?;
    let exchange = orchestrator.open_application(&req.app_name).await?;
    Ok(Json(exchange.payload()))
}

async fn text_to_speech(
    State(orchestrator): State<Orchestrator>,
    body: Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<Json<SpeechPayload>, ApiError> {
    let Json(req) = body?;
    let audio = orchestrator.speak(&req.text, req.language.as_deref()).await?;
    Ok(Json(SpeechPayload {
        audio_path: audio.to_wire(),
    }))
}

async fn get_audio(
    State(orchestrator): State<Orchestrator>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    match orchestrator.store().load(&filename).await? {
        Some(bytes) => Ok(([(header::CONTENT_TYPE, "audio/mpeg")], bytes).into_response()),
        None => Err(ApiError::NotFound(format!("audio {filename} not found"))),
    }
}

async fn health(State(orchestrator): State<Orchestrator>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        commands: orchestrator.executor().table().len(),
    })
}

/// Pull the `audio` field out of a multipart upload.
async fn read_audio(mut multipart: Multipart) -> Result<(Vec<u8>, String), ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("audio.wav").to_string();
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            break;
        }
        return Ok((bytes.to_vec(), file_name));
    }
    Err(RequestError::MissingAudio.into())
}
