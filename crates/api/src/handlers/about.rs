//! Handlers for the `/about` singleton.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use signworks_db::models::about::{AboutPage, WriteAboutPage};
use signworks_db::repositories::AboutRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for writing the about page.
#[derive(Debug, Deserialize, Validate)]
pub struct AboutPayload {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub mission: Option<String>,
    pub vision: Option<String>,
}

/// GET /api/v1/about
///
/// `data` is null until the page has been written once.
pub async fn get(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Option<AboutPage>>>> {
    let page = AboutRepo::get(&state.pool).await?;
    Ok(Json(DataResponse { data: page }))
}

/// PUT /api/v1/about
///
/// Creates the singleton on first write, updates it in place afterwards.
pub async fn update(
    _admin: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<AboutPayload>,
) -> AppResult<Json<DataResponse<AboutPage>>> {
    payload.validate()?;

    let input = WriteAboutPage {
        content: payload.content,
        mission: payload.mission,
        vision: payload.vision,
    };
    let page = AboutRepo::upsert(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: page }))
}
