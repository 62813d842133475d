//! File backend: a JSON snapshot at a path synced by external tooling
//! (Dropbox, Syncthing, a network mount).

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::models::AppData;
use crate::Result;

use super::SyncBackend;

/// Reads and writes the snapshot as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SyncBackend for FileBackend {
    async fn read_snapshot(&self) -> Result<Option<AppData>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no sync file yet");
            return Ok(None);
        }
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let data = serde_json::from_str(&raw)?;
        Ok(Some(data))
    }

    async fn write_snapshot(&self, data: &AppData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Pretty-printed: users inspect and version this file by hand.
        let json = serde_json::to_string_pretty(data)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::models::Task;

    use super::*;

    #[tokio::test]
    async fn missing_file_is_first_sync() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("sync.json"));
        assert_eq!(backend.read_snapshot().await.unwrap(), None);
    }

    #[tokio::test]
    async fn snapshot_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("dropbox/mindwtr/sync.json"));

        let mut data = AppData::empty();
        data.tasks.push(Task::new("shared"));
        backend.write_snapshot(&data).await.unwrap();

        let loaded = backend.read_snapshot().await.unwrap().unwrap();
        assert_eq!(loaded, data);
    }
}
