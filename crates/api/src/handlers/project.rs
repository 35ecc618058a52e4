//! Handlers for the `/projects` resource.
//!
//! Saving a project always carries the full desired image list; the update
//! path diffs it against the persisted set and applies the resulting
//! delete/insert/reorder plan. The steps are not atomic: object-store
//! removal runs first, metadata rows are deleted only for confirmed
//! removals, and nothing is rolled back on a later failure (the response
//! reports the failure, completed steps stay committed).

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use signworks_core::category::resolve_filter_category_ids;
use signworks_core::error::CoreError;
use signworks_core::reconcile::{self, ExistingImage, SubmittedImage};
use signworks_core::slug::slugify;
use signworks_core::types::DbId;
use signworks_db::models::category::Category;
use signworks_db::models::project::{CreateProject, Project, ProjectImage, ProjectListFilter};
use signworks_db::repositories::{CategoryRepo, ProjectImageRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One gallery image in a project payload. Position in the array defines
/// the display order.
#[derive(Debug, Deserialize, Validate)]
pub struct ImagePayload {
    #[validate(url(message = "Image url must be a valid URL"))]
    pub url: String,
    #[validate(length(min = 1, message = "Storage path is required"))]
    pub path: String,
    pub alt_text: Option<String>,
    pub width: i32,
    pub height: i32,
}

/// Request body for project create and update (full replacement).
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectPayload {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    /// Defaults to a slug derived from the title when omitted.
    #[validate(length(max = 200, message = "Slug must be at most 200 characters"))]
    pub slug: Option<String>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    pub category_id: DbId,
    pub project_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[validate(nested)]
    #[serde(default)]
    pub images: Vec<ImagePayload>,
}

fn default_active() -> bool {
    true
}

/// Query parameters for the project listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Include inactive projects (the admin table view).
    pub all: Option<bool>,
    /// Category reference: an id or a slug. A reference that resolves to
    /// nothing yields an empty list.
    pub category: Option<String>,
    /// Restrict to featured projects (the home page strip).
    pub featured: Option<bool>,
}

/// A project with its category and ordered gallery embedded.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub category: Option<Category>,
    pub images: Vec<ProjectImage>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

impl ProjectPayload {
    /// The row DTO, with the slug derived from the title when omitted.
    fn to_create(&self) -> AppResult<CreateProject> {
        let slug = match self.slug.as_deref().filter(|s| !s.is_empty()) {
            Some(slug) => slug.to_string(),
            None => slugify(&self.title),
        };
        if slug.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "A slug could not be derived from the title".into(),
            )));
        }

        Ok(CreateProject {
            title: self.title.clone(),
            slug,
            description: self.description.clone(),
            category_id: self.category_id,
            project_date: self.project_date,
            is_featured: self.is_featured,
            is_active: self.is_active,
        })
    }

    /// The submitted image list in the reconciler's terms.
    fn submitted_images(&self) -> Vec<SubmittedImage> {
        self.images
            .iter()
            .map(|img| SubmittedImage {
                storage_path: img.path.clone(),
                image_url: img.url.clone(),
                alt_text: img.alt_text.clone(),
                width: img.width,
                height: img.height,
            })
            .collect()
    }
}

/// Load a project's detail view (category + ordered images).
async fn load_detail(state: &AppState, project: Project) -> AppResult<ProjectDetail> {
    let category = CategoryRepo::find_by_id(&state.pool, project.category_id).await?;
    let images = ProjectImageRepo::list_by_project(&state.pool, project.id).await?;
    Ok(ProjectDetail {
        project,
        category,
        images,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<ProjectDetail>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;

    let mut filter = ProjectListFilter {
        only_active: !params.all.unwrap_or(false),
        only_featured: params.featured.unwrap_or(false),
        category_ids: None,
    };

    if let Some(reference) = params.category.as_deref() {
        // An unresolvable reference filters to nothing, not to everything.
        filter.category_ids = Some(resolve_filter_category_ids(&categories, reference));
    }

    let projects = ProjectRepo::list(&state.pool, &filter).await?;

    // Embed categories and galleries without per-project round trips.
    let project_ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
    let mut images_by_project: HashMap<DbId, Vec<ProjectImage>> = HashMap::new();
    for image in ProjectImageRepo::list_by_projects(&state.pool, &project_ids).await? {
        images_by_project.entry(image.project_id).or_default().push(image);
    }
    let categories_by_id: HashMap<DbId, Category> =
        categories.into_iter().map(|c| (c.id, c)).collect();

    let data = projects
        .into_iter()
        .map(|project| ProjectDetail {
            category: categories_by_id.get(&project.category_id).cloned(),
            images: images_by_project.remove(&project.id).unwrap_or_default(),
            project,
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let detail = load_detail(&state, project).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/v1/projects/slug/{slug}
///
/// Public detail lookup; only active projects resolve.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = ProjectRepo::find_active_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Project",
                key: slug.clone(),
            })
        })?;
    let detail = load_detail(&state, project).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/projects
pub async fn create(
    _admin: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<ProjectPayload>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectDetail>>)> {
    payload.validate()?;
    let input = payload.to_create()?;

    let project = ProjectRepo::create(&state.pool, &input).await?;

    // A fresh project has nothing persisted; the plan is pure inserts in
    // submitted order.
    let plan = reconcile::plan(&[], &payload.submitted_images(), &project.title);
    ProjectImageRepo::insert_many(&state.pool, project.id, &plan.to_insert).await?;

    let detail = load_detail(&state, project).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// PUT /api/v1/projects/{id}
///
/// Updates the row, then reconciles the gallery: removed images are purged
/// from the object store and (only when confirmed removed) from metadata,
/// new images are inserted, surviving images get their display order
/// updated. Last write wins when two edits race.
pub async fn update(
    _admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(payload): Json<ProjectPayload>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    payload.validate()?;
    let input = payload.to_create()?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let existing: Vec<ExistingImage> = ProjectImageRepo::list_refs(&state.pool, id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let plan = reconcile::plan(&existing, &payload.submitted_images(), &project.title);

    let mut failed_removals = 0usize;
    if !plan.to_delete.is_empty() {
        let paths: Vec<String> = plan
            .to_delete
            .iter()
            .map(|img| img.storage_path.clone())
            .collect();
        let outcome = state.storage.remove_batch(&paths).await;
        failed_removals = outcome.failed.len();

        let confirmed = reconcile::confirmed_delete_ids(&plan.to_delete, &outcome);
        ProjectImageRepo::delete_by_ids(&state.pool, &confirmed).await?;
    }

    ProjectImageRepo::insert_many(&state.pool, id, &plan.to_insert).await?;
    ProjectImageRepo::apply_reorders(&state.pool, id, &plan.to_reorder).await?;

    // Completed steps stay committed, but a failed removal means the
    // persisted set does not match the submission; report the failure.
    if failed_removals > 0 {
        return Err(AppError::InternalError(format!(
            "{failed_removals} image(s) could not be removed from storage"
        )));
    }

    let detail = load_detail(&state, project).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/projects/{id}
///
/// Purges the gallery from the object store (best effort), then deletes
/// the row; image metadata goes with it via cascade.
pub async fn delete(
    _admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let paths = ProjectImageRepo::list_storage_paths(&state.pool, id).await?;
    if !paths.is_empty() {
        let outcome = state.storage.remove_batch(&paths).await;
        if !outcome.failed.is_empty() {
            tracing::warn!(
                project_id = id,
                failed = outcome.failed.len(),
                "Orphaned objects left behind by project delete"
            );
        }
    }

    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}
