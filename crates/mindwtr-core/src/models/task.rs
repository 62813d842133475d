//! Task model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::now_iso;

use super::Syncable;

/// GTD workflow state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Captured but not yet processed
    #[default]
    Inbox,
    /// Actionable next action
    Next,
    /// Blocked on someone or something else
    Waiting,
    /// Deferred indefinitely
    Someday,
    /// Completed
    Done,
}

/// A task in the system
///
/// Only `id`, `updated_at`, `deleted_at`, and `purged_at` carry sync
/// semantics; every other field (including unknown fields preserved in
/// `extra`) travels through merge untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier (UUID v7, time-sortable)
    pub id: String,
    /// Task title
    pub title: String,
    /// GTD status
    #[serde(default)]
    pub status: TaskStatus,
    /// Free-form tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// GTD contexts (e.g. `@computer`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<String>,
    /// Owning project, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Creation timestamp (ISO-8601), never mutated after creation
    pub created_at: String,
    /// Last update timestamp (ISO-8601), bumped on every mutation
    pub updated_at: String,
    /// Soft-delete marker; deletion is a flag, not a removal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    /// Purge marker; hidden everywhere but still synced until compaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purged_at: Option<String>,
    /// Payload fields this core does not interpret (due dates, recurrence,
    /// checklists, attachments, ...) - round-tripped verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Task {
    /// Create a new task with the given title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let now = now_iso();
        Self {
            id: Uuid::now_v7().to_string(),
            title: title.into(),
            status: TaskStatus::Inbox,
            tags: Vec::new(),
            contexts: Vec::new(),
            project_id: None,
            created_at: now.clone(),
            updated_at: now,
            deleted_at: None,
            purged_at: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Bump `updated_at` after a payload mutation
    pub fn touch(&mut self) {
        self.updated_at = now_iso();
    }

    /// Soft-delete: set the tombstone marker and bump `updated_at` so the
    /// deletion itself competes in merges like any other edit
    pub fn mark_deleted(&mut self) {
        let now = now_iso();
        self.deleted_at = Some(now.clone());
        self.updated_at = now;
    }

    /// Whether this task is hidden from display (tombstoned or purged)
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some() || self.purged_at.is_some()
    }
}

impl Syncable for Task {
    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }

    fn purged_at(&self) -> Option<&str> {
        self.purged_at.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_task_new() {
        let task = Task::new("Write docs");
        assert_eq!(task.title, "Write docs");
        assert_eq!(task.status, TaskStatus::Inbox);
        assert!(task.deleted_at.is_none());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_task_ids_unique() {
        let a = Task::new("a");
        let b = Task::new("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_mark_deleted_bumps_updated_at() {
        let mut task = Task::new("Old");
        let before = task.updated_at.clone();
        task.mark_deleted();
        assert!(task.is_deleted());
        assert_eq!(task.deleted_at.as_deref(), Some(task.updated_at.as_str()));
        assert!(task.updated_at >= before);
    }

    #[test]
    fn test_created_at_survives_touch() {
        let mut task = Task::new("Stable");
        let created = task.created_at.clone();
        task.touch();
        assert_eq!(task.created_at, created);
    }

    #[test]
    fn test_unknown_payload_fields_round_trip() {
        let json = r#"{
            "id": "t1",
            "title": "Call bank",
            "status": "next",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z",
            "dueDate": "2025-02-01",
            "recurrence": { "rule": "weekly", "byDay": ["MO"] }
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::Next);
        assert_eq!(task.extra["dueDate"], "2025-02-01");

        let back = serde_json::to_value(&task).unwrap();
        assert_eq!(back["recurrence"]["rule"], "weekly");
    }
}
