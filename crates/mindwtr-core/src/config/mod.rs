//! Application configuration for client apps.
//!
//! Stores the sync backend selection and the data-file location. Credentials
//! live here too; the [`crate::backend::BackendConfig`] Debug impl redacts
//! them so they never reach logs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::backend::BackendConfig;
use crate::Result;

/// Persisted client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Path of the local data file; `None` means the platform default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<String>,
    /// Active sync backend; `None` means sync is not configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendConfig>,
}

impl AppConfig {
    /// Load configuration from a JSON file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Persist configuration, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Resolve the local data file path, falling back to `default_dir`.
    #[must_use]
    pub fn data_file(&self, default_dir: &Path) -> PathBuf {
        self.data_path
            .as_ref()
            .map_or_else(|| default_dir.join("data.json"), PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_config_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");

        let config = AppConfig {
            data_path: Some("/home/me/mindwtr/data.json".to_string()),
            backend: Some(BackendConfig::WebDav {
                url: "https://dav.example.com/mindwtr.json".to_string(),
                username: "me".to_string(),
                password: "secret".to_string(),
            }),
        };
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn debug_never_prints_credentials() {
        let config = AppConfig {
            data_path: None,
            backend: Some(BackendConfig::Cloud {
                url: "https://api.example.com/snapshot".to_string(),
                token: "very-secret".to_string(),
            }),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn data_file_falls_back_to_default_dir() {
        let config = AppConfig::default();
        let path = config.data_file(Path::new("/var/lib/mindwtr"));
        assert_eq!(path, PathBuf::from("/var/lib/mindwtr/data.json"));
    }
}
