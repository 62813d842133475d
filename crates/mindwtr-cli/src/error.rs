use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] mindwtr_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Could not determine a home directory for config/data files")]
    NoHomeDirectory,
    #[error(
        "Sync is not configured. Run `mindwtr config set-file`, `set-webdav`, or `set-cloud` first."
    )]
    SyncNotConfigured,
    #[error("No sync has run yet")]
    NoSyncOutcome,
}
