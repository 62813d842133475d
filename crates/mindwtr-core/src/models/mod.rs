//! Data models shared across all Mindwtr interfaces.

mod app_data;
mod area;
mod project;
mod settings;
mod task;

pub use app_data::AppData;
pub use area::Area;
pub use project::{Project, ProjectStatus};
pub use settings::{Settings, ThemeMode};
pub use task::{Task, TaskStatus};

/// Access to the fields the sync engine is allowed to inspect.
///
/// Everything else on an entity is opaque payload: the merge engine copies a
/// winning record wholesale and never looks inside it.
pub trait Syncable {
    /// Globally unique identifier, immutable after creation.
    fn id(&self) -> &str;

    /// ISO-8601 timestamp of the last mutation.
    fn updated_at(&self) -> &str;

    /// Soft-delete marker; `Some` means the entity is a tombstone.
    fn deleted_at(&self) -> Option<&str>;

    /// Purge marker; `Some` means the entity is pending permanent removal
    /// but is still carried for convergence.
    fn purged_at(&self) -> Option<&str>;
}
