//! Repository for the `projects` table.

use signworks_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectListFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, category_id, project_date, \
     is_featured, is_active, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, slug, description, category_id, project_date, \
                 is_featured, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.project_date)
            .bind(input.is_featured)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active project by slug (the public detail lookup).
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE slug = $1 AND is_active = TRUE");
        sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List projects matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectListFilter,
    ) -> Result<Vec<Project>, sqlx::Error> {
        // Build dynamic WHERE clauses; the category set is the only bind.
        let mut conditions = Vec::new();

        if filter.only_active {
            conditions.push("is_active = TRUE");
        }
        if filter.only_featured {
            conditions.push("is_featured = TRUE");
        }
        if filter.category_ids.is_some() {
            conditions.push("category_id = ANY($1)");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM projects {where_clause} ORDER BY created_at DESC, id DESC"
        );

        let mut q = sqlx::query_as::<_, Project>(&query);
        if let Some(ref ids) = filter.category_ids {
            q = q.bind(ids);
        }
        q.fetch_all(pool).await
    }

    /// Replace a project's fields (full replacement, like the admin form).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = $2,
                slug = $3,
                description = $4,
                category_id = $5,
                project_date = $6,
                is_featured = $7,
                is_active = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.project_date)
            .bind(input.is_featured)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Image rows go with it via cascade.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all projects.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }
}
