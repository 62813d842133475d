//! Project model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::now_iso;

use super::Syncable;

/// Lifecycle state of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Actively worked on
    #[default]
    Active,
    /// Deferred indefinitely
    Someday,
    /// All outcomes achieved
    Completed,
    /// Kept for reference only
    Archived,
}

/// A project grouping related tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier
    pub id: String,
    /// Project title
    pub title: String,
    /// Lifecycle status
    #[serde(default)]
    pub status: ProjectStatus,
    /// Owning area, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<String>,
    /// Creation timestamp (ISO-8601)
    pub created_at: String,
    /// Last update timestamp (ISO-8601)
    pub updated_at: String,
    /// Soft-delete marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    /// Purge marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purged_at: Option<String>,
    /// Uninterpreted payload (color, ordering, support notes, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Project {
    /// Create a new active project with the given title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let now = now_iso();
        Self {
            id: Uuid::now_v7().to_string(),
            title: title.into(),
            status: ProjectStatus::Active,
            area_id: None,
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

    /// Soft-delete: set the tombstone marker and bump `updated_at`
    pub fn mark_deleted(&mut self) {
        let now = now_iso();
        self.deleted_at = Some(now.clone());
        self.updated_at = now;
    }
}

impl Syncable for Project {
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
    use super::*;

    #[test]
    fn test_project_new_defaults() {
        let project = Project::new("Spring cleaning");
        assert_eq!(project.status, ProjectStatus::Active);
        assert!(project.area_id.is_none());
        assert_eq!(project.created_at, project.updated_at);
    }
}
