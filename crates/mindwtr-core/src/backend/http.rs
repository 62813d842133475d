//! Shared HTTP plumbing for the WebDAV and cloud backends.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::util::compact_text;
use crate::{Error, Result};

const HTTP_TIMEOUT_SECS: u64 = 30;
const MAX_RETRIES: u32 = 2;
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Build the reqwest client both HTTP backends share.
///
/// The client-level timeout bounds every snapshot fetch/push; a hung remote
/// ends the cycle in error instead of blocking it forever.
pub(crate) fn build_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()?)
}

/// Send a request, retrying a bounded number of times on retryable statuses
/// (429 and 5xx). Connection errors are not retried here; the next sync
/// cycle is the recovery path.
pub(crate) async fn send_with_retry(build: impl Fn() -> RequestBuilder) -> Result<Response> {
    let mut attempt = 0;
    loop {
        let response = build().send().await?;
        let status = response.status();
        if attempt < MAX_RETRIES && is_retryable(status) {
            attempt += 1;
            debug!(%status, attempt, "retrying snapshot request");
            tokio::time::sleep(Duration::from_millis(RETRY_BASE_DELAY_MS * u64::from(attempt)))
                .await;
            continue;
        }
        return Ok(response);
    }
}

/// Map a non-success response to a backend error with a compact body excerpt.
pub(crate) async fn error_for_status(operation: &str, response: Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let body = compact_text(&body);
    if body.is_empty() {
        Error::Backend(format!("{operation} failed with HTTP {}", status.as_u16()))
    } else {
        Error::Backend(format!(
            "{operation} failed with HTTP {}: {body}",
            status.as_u16()
        ))
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}
