//! Repository for the `about_page` singleton.

use sqlx::PgPool;

use crate::models::about::{AboutPage, WriteAboutPage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, content, mission, vision, updated_at";

/// Provides persistence operations for the about page.
pub struct AboutRepo;

impl AboutRepo {
    /// Fetch the singleton row, if it has ever been written.
    pub async fn get(pool: &PgPool) -> Result<Option<AboutPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM about_page ORDER BY id LIMIT 1");
        sqlx::query_as::<_, AboutPage>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Write the about page: updates the existing row in place, or creates
    /// it on first write.
    pub async fn upsert(pool: &PgPool, input: &WriteAboutPage) -> Result<AboutPage, sqlx::Error> {
        let update = format!(
            "UPDATE about_page SET content = $1, mission = $2, vision = $3, updated_at = NOW()
             WHERE id = (SELECT id FROM about_page ORDER BY id LIMIT 1)
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, AboutPage>(&update)
            .bind(&input.content)
            .bind(&input.mission)
            .bind(&input.vision)
            .fetch_optional(pool)
            .await?;

        if let Some(page) = updated {
            return Ok(page);
        }

        let insert = format!(
            "INSERT INTO about_page (content, mission, vision)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AboutPage>(&insert)
            .bind(&input.content)
            .bind(&input.mission)
            .bind(&input.vision)
            .fetch_one(pool)
            .await
    }
}
