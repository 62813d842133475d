//! Last-Write-Wins merge of entity collections.
//!
//! Devices edit independently and offline; there is no distributed lock and
//! no central ordering. Convergence relies on two rules only:
//!
//! 1. An id present on either side is present in the result exactly once.
//! 2. When both sides carry an id, the record with the strictly newer
//!    `updated_at` wins in full, tombstone state included. On an exact tie
//!    the record already in the map (the `local` side) wins; flipping this
//!    tie-break changes convergence when devices merge pairwise in different
//!    orders, so it must stay as-is.
//!
//! Deletions participate because they are modeled as tombstones: a delete is
//! an edit that sets `deleted_at`, not a removal from the collection.

use std::collections::HashMap;

use crate::models::{AppData, Syncable};
use crate::util::parse_timestamp_ms;

/// Merge two collections of the same entity kind.
///
/// Total over well-formed input: timestamps are produced by the editing
/// layer and assumed parseable. Result ordering is insertion order (local
/// first, then unseen incoming ids) and carries no meaning.
pub fn merge_entities<T: Syncable + Clone>(local: &[T], incoming: &[T]) -> Vec<T> {
    let mut order: Vec<&str> = Vec::with_capacity(local.len() + incoming.len());
    let mut map: HashMap<&str, &T> = HashMap::with_capacity(local.len() + incoming.len());

    for item in local {
        if map.insert(item.id(), item).is_none() {
            order.push(item.id());
        }
    }

    for item in incoming {
        let replace = match map.get(item.id()) {
            // New entity learned from the other side.
            None => {
                order.push(item.id());
                true
            }
            // Strictly newer wins, tombstone state included.
            // Older or equal keeps the existing record.
            Some(existing) => {
                parse_timestamp_ms(item.updated_at()) > parse_timestamp_ms(existing.updated_at())
            }
        };
        if replace {
            map.insert(item.id(), item);
        }
    }

    order
        .into_iter()
        .map(|id| map[id].clone())
        .collect()
}

/// Count ids that needed a real tie-break decision before a merge.
///
/// A shared id counts regardless of which side won, but only when the two
/// records actually differ: after a successful cycle local and remote are
/// identical, and re-running the cycle must report zero conflicts.
pub fn count_conflicts<T: Syncable + PartialEq>(local: &[T], incoming: &[T]) -> usize {
    let by_id: HashMap<&str, &T> = local.iter().map(|item| (item.id(), item)).collect();
    incoming
        .iter()
        .filter(|item| {
            by_id
                .get(item.id())
                .is_some_and(|existing| *existing != *item)
        })
        .count()
}

/// Filter out soft-deleted and purged items for display.
///
/// A pure projection for the UI-consumption boundary only. Never filter
/// before merging: merging filtered collections would resurrect deleted
/// items or drop deletions from the other side.
pub fn filter_deleted<T: Syncable + Clone>(items: &[T]) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.deleted_at().is_none() && item.purged_at().is_none())
        .cloned()
        .collect()
}

/// Merge two complete datasets for synchronization.
///
/// Tasks, projects, and areas merge per-collection; local settings are kept
/// verbatim because they are device-scoped preferences, not shared data.
#[must_use]
pub fn merge_app_data(local: &AppData, incoming: &AppData) -> AppData {
    AppData {
        tasks: merge_entities(&local.tasks, &incoming.tasks),
        projects: merge_entities(&local.projects, &incoming.projects),
        areas: merge_entities(&local.areas, &incoming.areas),
        settings: local.settings.clone(),
    }
}
