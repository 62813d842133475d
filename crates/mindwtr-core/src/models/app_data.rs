//! Root aggregate exchanged with storage and sync backends

use serde::{Deserialize, Serialize};

use super::{Area, Project, Settings, Task};

/// The complete application dataset: one snapshot of everything.
///
/// `tasks`, `projects`, and `areas` are the synchronized collections;
/// `settings` is device-local and excluded from cross-device merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub settings: Settings,
}

impl AppData {
    /// An empty dataset, used when a backend has no snapshot yet
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}
