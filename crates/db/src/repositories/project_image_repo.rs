//! Repository for the `project_images` table.
//!
//! These are the reconciler's collaborator operations: each call is a
//! single statement, and the multi-statement sequences the project
//! handlers run on top of them are deliberately not transactional.

use signworks_core::reconcile::{ImageInsert, ImageReorder};
use signworks_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{ProjectImage, ProjectImageRef};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, image_url, storage_path, alt_text, display_order, \
     width, height, file_size, created_at";

/// Provides persistence operations for project gallery images.
pub struct ProjectImageRepo;

impl ProjectImageRepo {
    /// List a project's images in gallery order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_images
             WHERE project_id = $1
             ORDER BY display_order, id"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List images for a set of projects in one round trip (gallery order
    /// within each project). Used to embed images into project listings.
    pub async fn list_by_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<ProjectImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_images
             WHERE project_id = ANY($1)
             ORDER BY project_id, display_order, id"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_ids)
            .fetch_all(pool)
            .await
    }

    /// The id/storage-path pairs reconciliation diffs against.
    pub async fn list_refs(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectImageRef>, sqlx::Error> {
        sqlx::query_as::<_, ProjectImageRef>(
            "SELECT id, storage_path FROM project_images WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Storage paths of all of a project's images (for purging the object
    /// store before a project delete).
    pub async fn list_storage_paths(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT storage_path FROM project_images WHERE project_id = $1")
                .bind(project_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(path,)| path).collect())
    }

    /// Insert new image rows computed by the reconciler.
    pub async fn insert_many(
        pool: &PgPool,
        project_id: DbId,
        inserts: &[ImageInsert],
    ) -> Result<(), sqlx::Error> {
        for image in inserts {
            sqlx::query(
                "INSERT INTO project_images
                     (project_id, image_url, storage_path, alt_text, display_order, width, height)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(project_id)
            .bind(&image.image_url)
            .bind(&image.storage_path)
            .bind(&image.alt_text)
            .bind(image.display_order)
            .bind(image.width)
            .bind(image.height)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    /// Apply the reconciler's display-order updates, keyed by storage path.
    pub async fn apply_reorders(
        pool: &PgPool,
        project_id: DbId,
        reorders: &[ImageReorder],
    ) -> Result<(), sqlx::Error> {
        for reorder in reorders {
            sqlx::query(
                "UPDATE project_images SET display_order = $3
                 WHERE project_id = $1 AND storage_path = $2",
            )
            .bind(project_id)
            .bind(&reorder.storage_path)
            .bind(reorder.display_order)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    /// Delete image rows by ID. Returns the number of rows removed.
    pub async fn delete_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM project_images WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
