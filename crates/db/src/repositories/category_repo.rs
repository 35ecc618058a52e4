//! Repository for the `categories` table.

use signworks_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryProjectCount, CreateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, slug, parent_id, description, display_order, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, slug, parent_id, description, display_order)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.parent_id)
            .bind(&input.description)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all categories ordered by display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY display_order, id");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Replace a category's fields. The admin form submits every field, so
    /// this is a full replacement rather than a partial patch.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = $2,
                slug = $3,
                parent_id = $4,
                description = $5,
                display_order = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.parent_id)
            .bind(&input.description)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category by ID. Returns `true` if a row was deleted.
    ///
    /// A category still referenced by projects fails the foreign key
    /// constraint; the error classification layer surfaces that as a
    /// conflict.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all categories.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// Active-project counts per category, for the related-categories view.
    ///
    /// Categories without active projects have no row; callers treat a
    /// missing entry as zero.
    pub async fn active_project_counts(
        pool: &PgPool,
    ) -> Result<Vec<CategoryProjectCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryProjectCount>(
            "SELECT category_id, COUNT(*) AS count
             FROM projects
             WHERE is_active = TRUE
             GROUP BY category_id",
        )
        .fetch_all(pool)
        .await
    }
}
