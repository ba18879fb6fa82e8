//! Append-only log of command outcomes.
//!
//! One line per outcome. Writers take an exclusive lock for exactly one line
//! write, so concurrent appends never interleave.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Clone)]
pub struct ResponseLog {
    path: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl ResponseLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry. Embedded newlines are flattened to spaces.
    pub async fn append(&self, entry: &str) -> std::io::Result<()> {
        let mut line = entry.replace(['\n', '\r'], " ");
        line.push('\n');

        let _guard = self.lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path.as_path())
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }

    /// Append in the background. Failures are logged and otherwise ignored.
    pub fn append_detached(&self, entry: String) -> tokio::task::JoinHandle<()> {
        let log = self.clone();
        tokio::spawn(async move {
            if let Err(e) = log.append(&entry).await {
                warn!("response log: failed to write {}: {e}", log.path.display());
            }
        })
    }
}
