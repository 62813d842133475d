//! JSON-file storage adapter.
//!
//! Snapshots are pretty-printed so users can inspect or version the data
//! file by hand.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::models::AppData;
use crate::{Error, Result};

use super::StorageAdapter;

/// Stores the dataset as a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StorageAdapter for FileStorage {
    async fn get_data(&self) -> Result<AppData> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "data file missing, starting empty");
            return Ok(AppData::empty());
        }

        let raw = tokio::fs::read_to_string(&self.path).await?;
        parse_snapshot(&raw)
    }

    async fn save_data(&self, data: &AppData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(data)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

/// Parse and structurally validate a snapshot document.
///
/// Corruption is never auto-repaired; repairing here risks silent data loss.
pub(crate) fn parse_snapshot(raw: &str) -> Result<AppData> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|error| Error::CorruptedData(format!("invalid JSON: {error}")))?;

    let Some(object) = value.as_object() else {
        return Err(Error::CorruptedData(
            "snapshot root is not an object".to_string(),
        ));
    };

    for field in ["tasks", "projects", "areas"] {
        if let Some(collection) = object.get(field) {
            if !collection.is_array() {
                return Err(Error::CorruptedData(format!("{field} is not an array")));
            }
        }
    }

    serde_json::from_value(value)
        .map_err(|error| Error::CorruptedData(format!("invalid snapshot shape: {error}")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::models::Task;

    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("data.json"));

        let data = storage.get_data().await.unwrap();
        assert_eq!(data, AppData::empty());
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested/deep/data.json"));

        let mut data = AppData::empty();
        data.tasks.push(Task::new("persisted"));
        storage.save_data(&data).await.unwrap();

        let loaded = storage.get_data().await.unwrap();
        assert_eq!(loaded, data);
    }

    #[tokio::test]
    async fn snapshot_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let storage = FileStorage::new(&path);

        storage.save_data(&AppData::empty()).await.unwrap();
        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(raw.contains('\n'));
    }

    #[tokio::test]
    async fn malformed_json_is_reported_as_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let error = FileStorage::new(&path).get_data().await.unwrap_err();
        assert!(matches!(error, Error::CorruptedData(_)));
    }

    #[test]
    fn non_array_collection_is_rejected() {
        let error = parse_snapshot(r#"{"tasks": "oops", "projects": []}"#).unwrap_err();
        assert!(error.to_string().contains("tasks is not an array"));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let data = parse_snapshot(r#"{"tasks": []}"#).unwrap();
        assert!(data.projects.is_empty());
        assert!(data.areas.is_empty());
    }
}
