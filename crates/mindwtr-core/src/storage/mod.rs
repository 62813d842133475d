//! Local storage abstraction.
//!
//! The physical on-disk format is a collaborator concern; the sync engine
//! only consumes this get/save contract.

mod file;

use async_trait::async_trait;

use crate::models::AppData;
use crate::Result;

pub use file::FileStorage;

/// Local snapshot store consumed by the sync orchestrator.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Read the full local dataset.
    ///
    /// Implementations must validate the structure on read and surface a
    /// [`crate::Error::CorruptedData`] on violation instead of silently
    /// returning empty collections, so the orchestrator refuses to merge
    /// against known-bad local state.
    async fn get_data(&self) -> Result<AppData>;

    /// Persist the full local dataset.
    async fn save_data(&self, data: &AppData) -> Result<()>;
}
