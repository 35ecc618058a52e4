//! Handlers for the `/settings` resource.
//!
//! Settings are seeded by migrations; only their values change at runtime.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use signworks_db::models::setting::SiteSetting;
use signworks_db::repositories::SettingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for a setting value update.
#[derive(Debug, Deserialize, Validate)]
pub struct SettingValuePayload {
    #[validate(length(max = 1000, message = "Value must be at most 1000 characters"))]
    pub value: String,
}

/// GET /api/v1/settings
///
/// Ordered by group then key, matching the admin panel's grouping.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SiteSetting>>>> {
    let settings = SettingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/settings/{key}
pub async fn update(
    _admin: AuthUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(payload): Json<SettingValuePayload>,
) -> AppResult<Json<DataResponse<SiteSetting>>> {
    payload.validate()?;

    let setting = SettingRepo::update_value(&state.pool, &key, &payload.value)
        .await?
        .ok_or_else(|| {
            AppError::Core(signworks_core::error::CoreError::NotFoundByKey {
                entity: "SiteSetting",
                key: key.clone(),
            })
        })?;
    Ok(Json(DataResponse { data: setting }))
}
