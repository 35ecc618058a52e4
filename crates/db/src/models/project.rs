//! Project and project image entity models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use signworks_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category_id: DbId,
    pub project_date: Option<NaiveDate>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or fully replacing a project row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category_id: DbId,
    pub project_date: Option<NaiveDate>,
    pub is_featured: bool,
    pub is_active: bool,
}

/// Filters for the project listing.
#[derive(Debug, Clone, Default)]
pub struct ProjectListFilter {
    /// Restrict to active projects (the public default).
    pub only_active: bool,
    /// Restrict to featured projects.
    pub only_featured: bool,
    /// Restrict to these category ids. `Some(vec![])` matches nothing --
    /// the result of an unresolvable category reference.
    pub category_ids: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// ProjectImage
// ---------------------------------------------------------------------------

/// A row from the `project_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectImage {
    pub id: DbId,
    pub project_id: DbId,
    pub image_url: String,
    pub storage_path: String,
    pub alt_text: Option<String>,
    pub display_order: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub file_size: Option<i64>,
    pub created_at: Timestamp,
}

/// The id/path pair reconciliation diffs against.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectImageRef {
    pub id: DbId,
    pub storage_path: String,
}

impl From<ProjectImageRef> for signworks_core::reconcile::ExistingImage {
    fn from(r: ProjectImageRef) -> Self {
        Self {
            id: r.id,
            storage_path: r.storage_path,
        }
    }
}
