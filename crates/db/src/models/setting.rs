//! Site setting entity model.

use serde::Serialize;
use signworks_core::types::DbId;
use sqlx::FromRow;

/// A row from the `site_settings` table.
///
/// Settings are created by seed migrations; the admin panel only edits
/// `value`. `group_name` exists purely for admin UI grouping.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteSetting {
    pub id: DbId,
    pub key: String,
    pub value: String,
    pub label: String,
    pub group_name: String,
}
