//! wicara CLI — voice assistant server and client.
//!
//! ```text
//! wicara serve [--port 5000] [--host 127.0.0.1] [--audio-dir static]
//! wicara ask "siapa presiden pertama indonesia?" [--server http://localhost:5000]
//! wicara open calculator / speak "halo" [--language id] / transcribe rekaman.wav
//! wicara health [--server ...]
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use wicara_lib::config::{
    AssistantConfig, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, DEFAULT_STT_URL,
    DEFAULT_TTS_URL,
};
use wicara_lib::orchestrator::Orchestrator;

const DEFAULT_SERVER: &str = "http://localhost:5000";

/// wicara — voice assistant: commands, questions, spoken answers
#[derive(Parser)]
#[command(name = "wicara", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Ask a question or give a command (`buka <name>`)
    Ask {
        text: String,
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
    /// Open an application from the command table
    Open {
        name: String,
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
    /// Synthesize text to an audio file on the server
    Speak {
        text: String,
        #[arg(long)]
        language: Option<String>,
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
    /// Transcribe an audio file
    Transcribe {
        file: PathBuf,
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
    /// Get server health
    Health {
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
}

#[derive(Args)]
struct ServeArgs {
    /// Listen port
    #[arg(long, default_value = "5000")]
    port: u16,
    /// Listen host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Gemini API key
    #[arg(long, env = "GENAI_API_KEY", hide_env_values = true)]
    api_key: String,
    /// Gemini model
    #[arg(long, env = "WICARA_GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    model: String,
    /// Gemini API endpoint
    #[arg(long, env = "WICARA_GEMINI_ENDPOINT", default_value = DEFAULT_GEMINI_ENDPOINT)]
    gemini_endpoint: String,
    /// Whisper-compatible transcription server
    #[arg(long, env = "WICARA_STT_URL", default_value = DEFAULT_STT_URL)]
    stt_url: String,
    /// Google Translate TTS endpoint
    #[arg(long, env = "WICARA_TTS_URL", default_value = DEFAULT_TTS_URL)]
    tts_url: String,
    /// Default speech language
    #[arg(long, env = "WICARA_LANGUAGE", default_value = "id")]
    language: String,
    /// Recognition locale
    #[arg(long, env = "WICARA_LOCALE", default_value = "id-ID")]
    locale: String,
    /// Directory for generated audio
    #[arg(long, env = "WICARA_AUDIO_DIR", default_value = "static")]
    audio_dir: PathBuf,
    /// Command outcome log
    #[arg(long, env = "WICARA_LOG", default_value = "responses.log")]
    log: PathBuf,
    /// JSON file mapping application names to executables
    #[arg(long, env = "WICARA_COMMANDS")]
    commands: Option<PathBuf>,
}

impl From<ServeArgs> for AssistantConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            gemini_api_key: args.api_key,
            gemini_endpoint: args.gemini_endpoint,
            gemini_model: args.model,
            stt_url: args.stt_url,
            tts_url: args.tts_url,
            language: args.language,
            locale: args.locale,
            audio_dir: args.audio_dir,
            log_path: args.log,
            commands_path: args.commands,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wicara_lib=debug,wicara=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Ask { text, server } => {
            post_json(&server, "process-query", serde_json::json!({ "query": text })).await
        }
        Command::Open { name, server } => {
            post_json(&server, "open-application", serde_json::json!({ "app_name": name })).await
        }
        Command::Speak {
            text,
            language,
            server,
        } => {
            post_json(
                &server,
                "text-to-speech",
                serde_json::json!({ "text": text, "language": language }),
            )
            .await
        }
        Command::Transcribe { file, server } => transcribe(&server, &file).await,
        Command::Health { server } => {
            let resp = reqwest::Client::new()
                .get(format!("{server}/health"))
                .send()
                .await
                .context("request failed")?;
            println!("{}", resp.text().await.unwrap_or_default());
            Ok(())
        }
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let addr = format!("{}:{}", args.host, args.port);
    let config = AssistantConfig::from(args);

    let orchestrator =
        Orchestrator::from_config(&config).context("invalid configuration")?;
    info!(
        "loaded {} commands, audio in {}",
        orchestrator.executor().table().len(),
        config.audio_dir.display()
    );

    let app = wicara_lib::server::router(orchestrator);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("wicara listening on {addr}");

    axum::serve(listener, app).await.context("server error")
}

async fn post_json(server: &str, endpoint: &str, body: serde_json::Value) -> anyhow::Result<()> {
    let resp = reqwest::Client::new()
        .post(format!("{server}/{endpoint}"))
        .json(&body)
        .send()
        .await
        .context("request failed")?;
    println!("{}", resp.text().await.unwrap_or_default());
    Ok(())
}

async fn transcribe(server: &str, file: &std::path::Path) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio.wav".into());

    let form = reqwest::multipart::Form::new()
        .part("audio", reqwest::multipart::Part::bytes(bytes).file_name(file_name));
    let resp = reqwest::Client::new()
        .post(format!("{server}/speech-to-text"))
        .multipart(form)
        .send()
        .await
        .context("request failed")?;
    println!("{}", resp.text().await.unwrap_or_default());
    Ok(())
}
