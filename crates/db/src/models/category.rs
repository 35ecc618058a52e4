//! Category entity model and DTOs.

use serde::{Deserialize, Serialize};
use signworks_core::category::CategoryRecord;
use signworks_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<DbId>,
    pub description: Option<String>,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CategoryRecord for Category {
    fn id(&self) -> DbId {
        self.id
    }
    fn slug(&self) -> &str {
        &self.slug
    }
    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }
    fn display_order(&self) -> i32 {
        self.display_order
    }
}

/// DTO for creating or fully replacing a category.
///
/// The admin form always submits every field, so updates are full
/// replacements rather than partial patches.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub slug: String,
    pub parent_id: Option<DbId>,
    pub description: Option<String>,
    pub display_order: i32,
}

/// Per-category active-project count row.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryProjectCount {
    pub category_id: DbId,
    pub count: i64,
}
