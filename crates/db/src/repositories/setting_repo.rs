//! Repository for the `site_settings` table.

use sqlx::PgPool;

use crate::models::setting::SiteSetting;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, key, value, label, group_name";

/// Provides persistence operations for site settings.
///
/// Settings are created by seed migrations; only `value` is writable at
/// runtime.
pub struct SettingRepo;

impl SettingRepo {
    /// List all settings ordered for admin grouping (group, then key).
    pub async fn list(pool: &PgPool) -> Result<Vec<SiteSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_settings ORDER BY group_name, key");
        sqlx::query_as::<_, SiteSetting>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a setting's value by key. Returns `None` for an unknown key.
    pub async fn update_value(
        pool: &PgPool,
        key: &str,
        value: &str,
    ) -> Result<Option<SiteSetting>, sqlx::Error> {
        let query = format!(
            "UPDATE site_settings SET value = $2 WHERE key = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSetting>(&query)
            .bind(key)
            .bind(value)
            .fetch_optional(pool)
            .await
    }
}
