//! Area model (a GTD area of responsibility, e.g. "Work" or "Health")

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::now_iso;

use super::Syncable;

/// An area of responsibility grouping projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Manual sort position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
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
    /// Uninterpreted payload
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Area {
    /// Create a new area with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = now_iso();
        Self {
            id: Uuid::now_v7().to_string(),
            name: name.into(),
            order: None,
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

impl Syncable for Area {
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
