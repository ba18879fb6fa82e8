//! Audio artifact storage — naming, writing and reading generated audio.

use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use wicara_core::error::RequestError;

const ARTIFACT_PREFIX: &str = "response_";
const ARTIFACT_EXT: &str = "mp3";

/// Directory of generated audio files.
///
/// Names are `response_<second timestamp>_<uuid>.mp3`: sortable by creation
/// time, unique regardless of how many requests land in the same second.
/// Nothing is ever deleted here.
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn new_name(&self) -> String {
        format!(
            "{ARTIFACT_PREFIX}{}_{}.{ARTIFACT_EXT}",
            Utc::now().format("%Y%m%d%H%M%S"),
            Uuid::new_v4().simple()
        )
    }

    /// Write a new artifact and return its `(name, path)`.
    pub async fn store(&self, bytes: &[u8]) -> std::io::Result<(String, PathBuf)> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let name = self.new_name();
        let path = self.dir.join(&name);
        tokio::fs::write(&path, bytes).await?;
        Ok((name, path))
    }

    /// Read an artifact back by name.
    ///
    /// Returns `Ok(None)` when no such artifact exists.
    pub async fn load(&self, name: &str) -> Result<Option<Vec<u8>>, RequestError> {
        let path = self.dir.join(validate_name(name)?);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(_) => Ok(None),
        }
    }
}

/// Only plain file names inside the store are addressable.
fn validate_name(name: &str) -> Result<&str, RequestError> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && !name.starts_with('.');
    if plain {
        Ok(name)
    } else {
        Err(RequestError::InvalidAudioName)
    }
}
