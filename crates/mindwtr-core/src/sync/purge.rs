//! Tombstone retention and permanent removal.
//!
//! The merge engine never drops an entity. Removal is a two-step, explicitly
//! invoked lifecycle (user empties trash, or a maintenance command runs):
//!
//! 1. [`purge_expired`] stamps `purged_at` on tombstones older than the
//!    retention window. A purged entity is excluded from display everywhere
//!    but still present in the collection, so the purge fact itself syncs
//!    via the ordinary LWW rule instead of resurrecting on the next merge
//!    with a device that still holds the entity.
//! 2. [`compact_purged`] physically drops entities whose `purged_at` is
//!    older than the retention window, once every device has had time to
//!    learn about the purge.

use chrono::{Duration, Utc};

use crate::models::AppData;
use crate::util::{now_iso, parse_timestamp_ms};

/// How long a tombstone is retained before it becomes purgeable, and how
/// long a purged entity is carried before compaction drops it.
pub const PURGE_RETENTION_DAYS: i64 = 30;

/// Stamp `purged_at` on every tombstone whose `deleted_at` is older than
/// `retention_days`. Returns how many entities were stamped.
pub fn purge_expired(data: &mut AppData, retention_days: i64) -> usize {
    let cutoff_ms = cutoff_ms(retention_days);
    let stamp = now_iso();
    let mut purged = 0;

    macro_rules! purge_collection {
        ($items:expr) => {
            for item in &mut $items {
                let expired = item
                    .deleted_at
                    .as_deref()
                    .is_some_and(|at| parse_timestamp_ms(at) < cutoff_ms);
                if expired && item.purged_at.is_none() {
                    item.purged_at = Some(stamp.clone());
                    item.updated_at = stamp.clone();
                    purged += 1;
                }
            }
        };
    }

    purge_collection!(data.tasks);
    purge_collection!(data.projects);
    purge_collection!(data.areas);
    purged
}

/// Drop entities whose `purged_at` is older than `retention_days`.
/// Returns how many entities were removed.
pub fn compact_purged(data: &mut AppData, retention_days: i64) -> usize {
    let cutoff_ms = cutoff_ms(retention_days);
    let mut compacted = 0;

    macro_rules! compact_collection {
        ($items:expr) => {
            $items.retain(|item| {
                let droppable = item
                    .purged_at
                    .as_deref()
                    .is_some_and(|at| parse_timestamp_ms(at) < cutoff_ms);
                if droppable {
                    compacted += 1;
                }
                !droppable
            });
        };
    }

    compact_collection!(data.tasks);
    compact_collection!(data.projects);
    compact_collection!(data.areas);
    compacted
}

fn cutoff_ms(retention_days: i64) -> i64 {
    (Utc::now() - Duration::days(retention_days)).timestamp_millis()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::models::Task;

    use super::*;

    fn old_tombstone(id: &str) -> Task {
        let mut task = Task::new("gone");
        task.id = id.to_string();
        task.deleted_at = Some("2020-01-01T00:00:00Z".to_string());
        task.updated_at = "2020-01-01T00:00:00Z".to_string();
        task
    }

    #[test]
    fn purge_stamps_expired_tombstones_only() {
        let mut data = AppData::empty();
        data.tasks.push(old_tombstone("t1"));
        let mut fresh = Task::new("just deleted");
        fresh.mark_deleted();
        data.tasks.push(fresh);
        data.tasks.push(Task::new("live"));

        let purged = purge_expired(&mut data, PURGE_RETENTION_DAYS);
        assert_eq!(purged, 1);
        assert!(data.tasks[0].purged_at.is_some());
        assert!(data.tasks[1].purged_at.is_none());
        assert!(data.tasks[2].purged_at.is_none());
        // Entity stays present so the purge fact can still sync.
        assert_eq!(data.tasks.len(), 3);
    }

    #[test]
    fn purge_does_not_restamp() {
        let mut data = AppData::empty();
        let mut already = old_tombstone("t1");
        already.purged_at = Some("2020-02-01T00:00:00Z".to_string());
        data.tasks.push(already);

        assert_eq!(purge_expired(&mut data, PURGE_RETENTION_DAYS), 0);
        assert_eq!(
            data.tasks[0].purged_at.as_deref(),
            Some("2020-02-01T00:00:00Z")
        );
    }

    #[test]
    fn compact_drops_only_old_purged() {
        let mut data = AppData::empty();
        let mut old = old_tombstone("t1");
        old.purged_at = Some("2020-02-01T00:00:00Z".to_string());
        data.tasks.push(old);
        let mut recent = old_tombstone("t2");
        recent.purged_at = Some(crate::util::now_iso());
        data.tasks.push(recent);
        data.tasks.push(Task::new("live"));

        let compacted = compact_purged(&mut data, PURGE_RETENTION_DAYS);
        assert_eq!(compacted, 1);
        let ids: Vec<&str> = data.tasks.iter().map(|t| t.id.as_str()).collect();
        assert!(!ids.contains(&"t1"));
        assert!(ids.contains(&"t2"));
    }
}
