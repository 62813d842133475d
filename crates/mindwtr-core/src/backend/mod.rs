//! Pluggable sync backend transports.
//!
//! A backend moves one serialized [`AppData`] snapshot to and from a shared
//! location: a plain file (synced externally by Dropbox/Syncthing), a WebDAV
//! resource, or a generic cloud HTTP endpoint. All three speak the identical
//! JSON encoding, so switching backend kind mid-lifecycle is data-compatible.

mod cloud;
mod file;
mod http;
mod webdav;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::AppData;
use crate::util::{is_http_url, normalize_text_option};
use crate::{Error, Result};

pub use cloud::CloudBackend;
pub use file::FileBackend;
pub use webdav::WebDavBackend;

/// Read/write capability for a sync snapshot.
#[async_trait]
pub trait SyncBackend: Send + Sync {
    /// Fetch the remote snapshot.
    ///
    /// `Ok(None)` means "no snapshot yet" (first sync), not an error.
    async fn read_snapshot(&self) -> Result<Option<AppData>>;

    /// Replace the remote snapshot.
    async fn write_snapshot(&self, data: &AppData) -> Result<()>;
}

/// Backend selection, one variant per transport kind.
///
/// Exactly one backend is active at a time; switching is a configuration
/// change with no automatic data migration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    /// A file path shared via external sync tooling
    File { path: String },
    /// A WebDAV resource with basic auth
    WebDav {
        url: String,
        username: String,
        password: String,
    },
    /// A cloud endpoint with bearer-token auth
    Cloud { url: String, token: String },
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File { path } => formatter.debug_struct("File").field("path", path).finish(),
            Self::WebDav { url, username, .. } => formatter
                .debug_struct("WebDav")
                .field("url", url)
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Self::Cloud { url, .. } => formatter
                .debug_struct("Cloud")
                .field("url", url)
                .field("token", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Build the active backend from its configuration.
pub fn create_backend(config: &BackendConfig) -> Result<Arc<dyn SyncBackend>> {
    match config {
        BackendConfig::File { path } => {
            let path = normalize_text_option(Some(path.clone())).ok_or_else(|| {
                Error::InvalidInput("sync file path must not be empty".to_string())
            })?;
            Ok(Arc::new(FileBackend::new(path)))
        }
        BackendConfig::WebDav {
            url,
            username,
            password,
        } => {
            let url = normalize_http_url(url, "WebDAV URL")?;
            Ok(Arc::new(WebDavBackend::new(
                url,
                username.clone(),
                password.clone(),
            )?))
        }
        BackendConfig::Cloud { url, token } => {
            let url = normalize_http_url(url, "cloud URL")?;
            let token = normalize_text_option(Some(token.clone())).ok_or_else(|| {
                Error::InvalidInput("cloud token must not be empty".to_string())
            })?;
            Ok(Arc::new(CloudBackend::new(url, token)?))
        }
    }
}

fn normalize_http_url(raw: &str, field: &str) -> Result<String> {
    let url = normalize_text_option(Some(raw.to_string()))
        .ok_or_else(|| Error::InvalidInput(format!("{field} must not be empty")))?;
    if is_http_url(&url) {
        Ok(url.trim_end_matches('/').to_string())
    } else {
        Err(Error::InvalidInput(format!(
            "{field} must include http:// or https://"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_backend_rejects_empty_path() {
        let config = BackendConfig::File {
            path: "   ".to_string(),
        };
        assert!(create_backend(&config).is_err());
    }

    #[test]
    fn create_backend_rejects_url_without_scheme() {
        let config = BackendConfig::WebDav {
            url: "dav.example.com/data.json".to_string(),
            username: "me".to_string(),
            password: "secret".to_string(),
        };
        let error = create_backend(&config).err().unwrap();
        assert!(error.to_string().contains("http:// or https://"));
    }

    #[test]
    fn backend_config_uses_kind_tag() {
        let config = BackendConfig::Cloud {
            url: "https://api.example.com/snapshot".to_string(),
            token: "tok".to_string(),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["kind"], "cloud");

        let parsed: BackendConfig =
            serde_json::from_str(r#"{"kind":"file","path":"/tmp/sync.json"}"#).unwrap();
        assert_eq!(
            parsed,
            BackendConfig::File {
                path: "/tmp/sync.json".to_string()
            }
        );
    }
}
