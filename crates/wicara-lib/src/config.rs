//! Engine configuration and the command table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use wicara_core::error::ConfigError;
use wicara_core::types::{DEFAULT_LANGUAGE, DEFAULT_LOCALE};

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_STT_URL: &str = "http://localhost:2022";
pub const DEFAULT_TTS_URL: &str = "https://translate.google.com";

/// Everything the engine needs to wire up its collaborators.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub gemini_api_key: String,
    pub gemini_endpoint: String,
    pub gemini_model: String,
    /// Base URL of the whisper-compatible transcription server.
    pub stt_url: String,
    /// Base URL of the Google Translate TTS endpoint.
    pub tts_url: String,
    /// Default synthesis language.
    pub language: String,
    /// Recognition locale.
    pub locale: String,
    /// Directory generated audio is written to and served from.
    pub audio_dir: PathBuf,
    /// Append-only command outcome log.
    pub log_path: PathBuf,
    /// Optional JSON object mapping command names to executables.
    pub commands_path: Option<PathBuf>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.into(),
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
            stt_url: DEFAULT_STT_URL.into(),
            tts_url: DEFAULT_TTS_URL.into(),
            language: DEFAULT_LANGUAGE.into(),
            locale: DEFAULT_LOCALE.into(),
            audio_dir: PathBuf::from("static"),
            log_path: PathBuf::from("responses.log"),
            commands_path: None,
        }
    }
}

impl AssistantConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }

    /// Load the command table from `commands_path`, or the built-in one.
    pub fn command_table(&self) -> Result<CommandTable, ConfigError> {
        match &self.commands_path {
            Some(path) => CommandTable::load(path),
            None => Ok(CommandTable::builtin()),
        }
    }
}

/// Read-only map from spoken application name to launch identifier.
///
/// Lookups are case-sensitive. Built once at start-up and shared behind an
/// `Arc`; nothing mutates it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandTable {
    entries: HashMap<String, String>,
}

impl CommandTable {
    pub fn builtin() -> Self {
        Self::from_pairs([
            ("calculator", "calc"),
            ("kalkulator", "calc"),
            ("notepad", "notepad"),
            ("paint", "mspaint"),
            ("explorer", "explorer"),
        ])
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a JSON object of `name -> executable` pairs.
    pub fn from_json(json: &str, origin: &str) -> Result<Self, ConfigError> {
        let entries: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseCommands {
                path: origin.to_string(),
                detail: e.to_string(),
            })?;
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadCommands {
            path: origin.clone(),
            source,
        })?;
        Self::from_json(&json, &origin)
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
