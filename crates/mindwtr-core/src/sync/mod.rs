//! Sync engine: LWW merge plus the cycle orchestrator.
//!
//! One cycle runs: local read -> remote read -> merge -> local write ->
//! remote write -> outcome. The local write deliberately precedes the remote
//! write: if the process dies between them, the store that is guaranteed to
//! be available already holds the more-complete state and the next cycle
//! pushes it again (the merge is idempotent and convergent).

mod merge;
mod purge;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::backend::SyncBackend;
use crate::models::AppData;
use crate::storage::StorageAdapter;
use crate::util::now_iso;
use crate::{Error, Result};

pub use merge::{count_conflicts, filter_deleted, merge_app_data, merge_entities};
pub use purge::{compact_purged, purge_expired, PURGE_RETENTION_DAYS};

/// Overall status of a sync cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Error,
}

/// Per-collection merge statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    /// Entities in the merged collection
    pub merged_total: usize,
    /// Ids present on both sides before the merge
    pub conflicts: usize,
}

/// Structured record of one completed or failed sync cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub started_at: String,
    pub completed_at: String,
    pub status: SyncStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub tasks: CollectionStats,
    #[serde(default)]
    pub projects: CollectionStats,
    #[serde(default)]
    pub areas: CollectionStats,
}

impl SyncOutcome {
    fn failure(started_at: String, error: &Error) -> Self {
        Self {
            started_at,
            completed_at: now_iso(),
            status: SyncStatus::Error,
            error_message: Some(error.to_string()),
            tasks: CollectionStats::default(),
            projects: CollectionStats::default(),
            areas: CollectionStats::default(),
        }
    }
}

/// Drives sync cycles against one configured backend.
///
/// The local store is exclusively owned by the process running this service;
/// cross-device conflicts are resolved by the per-entity LWW rule, not by
/// any distributed lock.
pub struct SyncService {
    storage: Arc<dyn StorageAdapter>,
    backend: Arc<dyn SyncBackend>,
    // Re-entrancy guard: two interleaved cycles against the same store
    // could silently drop one side's edits.
    in_progress: AtomicBool,
}

impl SyncService {
    pub fn new(storage: Arc<dyn StorageAdapter>, backend: Arc<dyn SyncBackend>) -> Self {
        Self {
            storage,
            backend,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Run one full sync cycle.
    ///
    /// Returns `Err(Error::SyncInProgress)` when a cycle is already running.
    /// Any other failure is folded into the returned [`SyncOutcome`] so the
    /// caller always gets a displayable record.
    pub async fn perform_sync(&self) -> Result<SyncOutcome> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::SyncInProgress);
        }

        let started_at = now_iso();
        let outcome = match self.run_cycle(&started_at).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(%error, "sync cycle failed");
                SyncOutcome::failure(started_at, &error)
            }
        };

        self.in_progress.store(false, Ordering::Release);
        Ok(outcome)
    }

    async fn run_cycle(&self, started_at: &str) -> Result<SyncOutcome> {
        let local = self.storage.get_data().await?;

        // A missing remote snapshot is the first-sync case, not an error.
        let remote = self
            .backend
            .read_snapshot()
            .await?
            .unwrap_or_else(AppData::empty);
        debug!(
            local_tasks = local.tasks.len(),
            remote_tasks = remote.tasks.len(),
            "snapshots loaded"
        );

        // Conflicts are counted before the merge: an id present on both
        // sides with differing records needed a winner, whichever side won.
        let task_conflicts = count_conflicts(&local.tasks, &remote.tasks);
        let project_conflicts = count_conflicts(&local.projects, &remote.projects);
        let area_conflicts = count_conflicts(&local.areas, &remote.areas);

        let merged = merge_app_data(&local, &remote);
        let tasks = CollectionStats {
            merged_total: merged.tasks.len(),
            conflicts: task_conflicts,
        };
        let projects = CollectionStats {
            merged_total: merged.projects.len(),
            conflicts: project_conflicts,
        };
        let areas = CollectionStats {
            merged_total: merged.areas.len(),
            conflicts: area_conflicts,
        };

        // Local write first; a failure past this point leaves local ahead of
        // remote, which the next cycle repairs by re-pushing.
        self.storage.save_data(&merged).await?;
        self.backend.write_snapshot(&merged).await?;

        info!(
            tasks = tasks.merged_total,
            projects = projects.merged_total,
            areas = areas.merged_total,
            conflicts = tasks.conflicts + projects.conflicts + areas.conflicts,
            "sync cycle completed"
        );

        Ok(SyncOutcome {
            started_at: started_at.to_string(),
            completed_at: now_iso(),
            status: SyncStatus::Success,
            error_message: None,
            tasks,
            projects,
            areas,
        })
    }
}
