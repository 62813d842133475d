//! Cloud backend: GET/PUT of the snapshot against a fixed HTTP endpoint
//! with bearer-token authentication.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::models::AppData;
use crate::Result;

use super::http::{build_client, error_for_status, send_with_retry};
use super::SyncBackend;

/// Snapshot resource on a generic cloud endpoint.
#[derive(Clone)]
pub struct CloudBackend {
    url: String,
    token: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for CloudBackend {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CloudBackend")
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl CloudBackend {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            token: token.into(),
            client: build_client()?,
        })
    }
}

#[async_trait]
impl SyncBackend for CloudBackend {
    async fn read_snapshot(&self) -> Result<Option<AppData>> {
        let response = send_with_retry(|| {
            self.client
                .get(&self.url)
                .bearer_auth(&self.token)
                .header(reqwest::header::ACCEPT, "application/json")
        })
        .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(url = %self.url, "no remote snapshot yet");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_for_status("cloud GET", response).await);
        }

        let data = response.json::<AppData>().await?;
        Ok(Some(data))
    }

    async fn write_snapshot(&self, data: &AppData) -> Result<()> {
        let body = serde_json::to_string(data)?;
        let response = send_with_retry(|| {
            self.client
                .put(&self.url)
                .bearer_auth(&self.token)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body.clone())
        })
        .await?;

        if !response.status().is_success() {
            return Err(error_for_status("cloud PUT", response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let backend =
            CloudBackend::new("https://api.example.com/v1/snapshot", "secret-token").unwrap();
        let debug = format!("{backend:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
