//! Handler for the admin dashboard summary.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use signworks_db::repositories::{CategoryRepo, ContactRepo, ProjectRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Counters shown on the admin landing page.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_projects: i64,
    pub total_categories: i64,
    pub unread_messages: i64,
}

/// GET /api/v1/dashboard
pub async fn stats(
    _admin: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let total_projects = ProjectRepo::count_all(&state.pool).await?;
    let total_categories = CategoryRepo::count_all(&state.pool).await?;
    let unread_messages = ContactRepo::count_unread(&state.pool).await?;

    Ok(Json(DataResponse {
        data: DashboardStats {
            total_projects,
            total_categories,
            unread_messages,
        },
    }))
}
