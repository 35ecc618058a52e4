//! About-page singleton model and DTO.

use serde::{Deserialize, Serialize};
use signworks_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// The single row of the `about_page` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AboutPage {
    pub id: DbId,
    pub content: String,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for writing the about page. Creates the row on first write.
#[derive(Debug, Clone, Deserialize)]
pub struct WriteAboutPage {
    pub content: String,
    pub mission: Option<String>,
    pub vision: Option<String>,
}
