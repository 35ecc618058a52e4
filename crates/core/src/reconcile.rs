//! Project image reconciliation.
//!
//! When a project is saved, the client submits the full desired image list
//! in display order. [`plan`] diffs that list against the persisted state
//! and computes the minimal set of mutations: stored images to purge,
//! submitted images to insert, and surviving images whose display order
//! must be updated. The storage path is the reconciliation key, not the
//! database id.
//!
//! Applying the plan is the caller's job and is deliberately not atomic:
//! object-store removal runs first, metadata rows are deleted only for
//! paths whose removal was confirmed ([`confirmed_delete_ids`]), and
//! inserts/reorders are independent of each other. Completed steps are
//! never rolled back; concurrent edits of the same project are
//! last-write-wins.

use std::collections::HashSet;

use crate::types::DbId;

/// A persisted image row, reduced to the fields reconciliation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingImage {
    pub id: DbId,
    pub storage_path: String,
}

/// One entry of the submitted desired image list.
///
/// Position in the submitted slice defines the desired display order.
#[derive(Debug, Clone)]
pub struct SubmittedImage {
    pub storage_path: String,
    pub image_url: String,
    pub alt_text: Option<String>,
    pub width: i32,
    pub height: i32,
}

/// A new metadata row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInsert {
    pub storage_path: String,
    pub image_url: String,
    pub alt_text: String,
    pub display_order: i32,
    pub width: i32,
    pub height: i32,
}

/// A display-order update for a surviving row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReorder {
    pub storage_path: String,
    pub display_order: i32,
}

/// The computed mutation set for one reconciliation.
#[derive(Debug, Default)]
pub struct ReconcilePlan {
    /// Stored images absent from the submitted list: purge from the object
    /// store, then from metadata.
    pub to_delete: Vec<ExistingImage>,
    /// Submitted images with no stored counterpart.
    pub to_insert: Vec<ImageInsert>,
    /// Surviving images whose display order follows the submitted position.
    pub to_reorder: Vec<ImageReorder>,
}

/// Per-path result of a batch object-store removal.
#[derive(Debug, Default)]
pub struct RemovalOutcome {
    /// Paths confirmed removed from the object store.
    pub removed: Vec<String>,
    /// Paths whose removal failed or is indeterminate.
    pub failed: Vec<String>,
}

impl RemovalOutcome {
    /// Outcome reporting every path as confirmed removed.
    pub fn all_removed(paths: impl IntoIterator<Item = String>) -> Self {
        Self {
            removed: paths.into_iter().collect(),
            failed: Vec::new(),
        }
    }
}

/// Diff the persisted image set against the submitted desired set.
///
/// `default_alt` (the project title) fills in missing alt text on inserts.
/// A storage path occurring twice in `submitted` keeps its first
/// occurrence; later duplicates are ignored so no path is inserted or
/// reordered twice.
pub fn plan(
    existing: &[ExistingImage],
    submitted: &[SubmittedImage],
    default_alt: &str,
) -> ReconcilePlan {
    let have: HashSet<&str> = existing.iter().map(|img| img.storage_path.as_str()).collect();

    let mut keep: HashSet<&str> = HashSet::with_capacity(submitted.len());
    let mut to_insert = Vec::new();
    let mut to_reorder = Vec::new();

    for (position, image) in submitted.iter().enumerate() {
        if !keep.insert(image.storage_path.as_str()) {
            continue;
        }
        let display_order = position as i32;

        if have.contains(image.storage_path.as_str()) {
            to_reorder.push(ImageReorder {
                storage_path: image.storage_path.clone(),
                display_order,
            });
        } else {
            to_insert.push(ImageInsert {
                storage_path: image.storage_path.clone(),
                image_url: image.image_url.clone(),
                alt_text: image
                    .alt_text
                    .clone()
                    .filter(|alt| !alt.is_empty())
                    .unwrap_or_else(|| default_alt.to_string()),
                display_order,
                width: image.width,
                height: image.height,
            });
        }
    }

    let to_delete = existing
        .iter()
        .filter(|img| !keep.contains(img.storage_path.as_str()))
        .cloned()
        .collect();

    ReconcilePlan {
        to_delete,
        to_insert,
        to_reorder,
    }
}

/// Metadata row ids safe to delete after a batch removal.
///
/// Only rows whose storage path was confirmed removed qualify; a row whose
/// object failed to delete is retained so metadata never points at nothing
/// while the object may still exist.
pub fn confirmed_delete_ids(to_delete: &[ExistingImage], outcome: &RemovalOutcome) -> Vec<DbId> {
    let removed: HashSet<&str> = outcome.removed.iter().map(String::as_str).collect();
    to_delete
        .iter()
        .filter(|img| removed.contains(img.storage_path.as_str()))
        .map(|img| img.id)
        .collect()
}
