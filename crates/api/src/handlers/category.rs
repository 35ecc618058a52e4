//! Handlers for the `/categories` resource.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use signworks_core::category::{
    group_by_parent, project_count_for_category, related_categories, DEFAULT_SIBLING_LIMIT,
    DEFAULT_TOTAL_LIMIT,
};
use signworks_core::error::CoreError;
use signworks_core::slug::slugify;
use signworks_core::types::DbId;
use signworks_db::models::category::{Category, CreateCategory};
use signworks_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for category create and update (full replacement).
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryPayload {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    /// Defaults to a slug derived from the name when omitted.
    #[validate(length(max = 100, message = "Slug must be at most 100 characters"))]
    pub slug: Option<String>,
    pub parent_id: Option<DbId>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

/// A top-level category with its ordered children.
#[derive(Debug, Serialize)]
pub struct CategoryTreeNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
}

/// A related category enriched with its active-project count.
#[derive(Debug, Serialize)]
pub struct RelatedCategory {
    #[serde(flatten)]
    pub category: Category,
    pub project_count: i64,
}

/// Query parameters for the related-categories endpoint.
#[derive(Debug, Deserialize)]
pub struct RelatedParams {
    pub limit: Option<usize>,
    pub total: Option<usize>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the effective slug and check the depth-1 parent rule, turning a
/// payload into a storable DTO.
async fn prepare_input(
    state: &AppState,
    payload: &CategoryPayload,
    own_id: Option<DbId>,
) -> AppResult<CreateCategory> {
    let slug = match payload.slug.as_deref().filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => slugify(&payload.name),
    };
    if slug.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A slug could not be derived from the name".into(),
        )));
    }

    if let Some(parent_id) = payload.parent_id {
        if own_id == Some(parent_id) {
            return Err(AppError::Core(CoreError::Validation(
                "A category cannot be its own parent".into(),
            )));
        }
        let parent = CategoryRepo::find_by_id(&state.pool, parent_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "Parent category {parent_id} does not exist"
                )))
            })?;
        // Nesting is one level deep: a parent must itself be top-level.
        if parent.parent_id.is_some() {
            return Err(AppError::Core(CoreError::Validation(
                "Parent must be a top-level category".into(),
            )));
        }
    }

    Ok(CreateCategory {
        name: payload.name.clone(),
        slug,
        parent_id: payload.parent_id,
        description: payload.description.clone(),
        display_order: payload.display_order,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/tree
///
/// Top-level categories with their children, in display order.
pub async fn tree(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryTreeNode>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;

    let nodes = group_by_parent(&categories)
        .into_iter()
        .map(|group| CategoryTreeNode {
            category: group.parent.clone(),
            children: group.children.into_iter().cloned().collect(),
        })
        .collect();

    Ok(Json(DataResponse { data: nodes }))
}

/// GET /api/v1/categories/{id}/related
///
/// Categories related to the given one for the project detail view:
/// siblings first, padded with other top-level categories, each with its
/// active-project count (parents roll up their children).
pub async fn related(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RelatedParams>,
) -> AppResult<Json<DataResponse<Vec<RelatedCategory>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;

    let related = related_categories(
        &categories,
        id,
        params.limit.unwrap_or(DEFAULT_SIBLING_LIMIT),
        params.total.unwrap_or(DEFAULT_TOTAL_LIMIT),
    );

    let counts: HashMap<DbId, i64> = CategoryRepo::active_project_counts(&state.pool)
        .await?
        .into_iter()
        .map(|row| (row.category_id, row.count))
        .collect();

    let data = related
        .into_iter()
        .map(|category| RelatedCategory {
            project_count: project_count_for_category(category, &categories, &counts),
            category: category.clone(),
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/categories
pub async fn create(
    _admin: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    payload.validate()?;
    let input = prepare_input(&state, &payload, None).await?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    _admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(payload): Json<CategoryPayload>,
) -> AppResult<Json<DataResponse<Category>>> {
    payload.validate()?;
    let input = prepare_input(&state, &payload, Some(id)).await?;
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// A category still referenced by projects fails its foreign key and is
/// surfaced as a 409; this layer does not re-derive that policy.
pub async fn delete(
    _admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
    }
}
