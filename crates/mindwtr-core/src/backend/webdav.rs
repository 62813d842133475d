//! WebDAV backend: GET/PUT of the snapshot against a fixed URL with basic
//! authentication.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::models::AppData;
use crate::Result;

use super::http::{build_client, error_for_status, send_with_retry};
use super::SyncBackend;

/// Snapshot resource on a WebDAV server.
#[derive(Clone)]
pub struct WebDavBackend {
    url: String,
    username: String,
    password: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for WebDavBackend {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("WebDavBackend")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl WebDavBackend {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            client: build_client()?,
        })
    }
}

#[async_trait]
impl SyncBackend for WebDavBackend {
    async fn read_snapshot(&self) -> Result<Option<AppData>> {
        let response = send_with_retry(|| {
            self.client
                .get(&self.url)
                .basic_auth(&self.username, Some(&self.password))
        })
        .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(url = %self.url, "no remote snapshot yet");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_for_status("WebDAV GET", response).await);
        }

        let data = response.json::<AppData>().await?;
        Ok(Some(data))
    }

    async fn write_snapshot(&self, data: &AppData) -> Result<()> {
        let body = serde_json::to_string(data)?;
        let response = send_with_retry(|| {
            self.client
                .put(&self.url)
                .basic_auth(&self.username, Some(&self.password))
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body.clone())
        })
        .await?;

        if !response.status().is_success() {
            return Err(error_for_status("WebDAV PUT", response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password() {
        let backend = WebDavBackend::new(
            "https://dav.example.com/mindwtr.json",
            "me",
            "hunter2",
        )
        .unwrap();
        let debug = format!("{backend:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
