//! Handlers for the `/contact` resource.
//!
//! Submission is the only public write in the whole API; everything else
//! on this resource is admin-side inbox management.

use std::sync::LazyLock;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use signworks_core::error::CoreError;
use signworks_core::types::DbId;
use signworks_db::models::contact::{ContactMessage, CreateContactMessage};
use signworks_db::repositories::ContactRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Turkish phone numbers: optional +90/0 prefix, then ten digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+90|0)?[0-9]{10}$").expect("static phone regex"));

/// Request body for a public contact-form submission.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactPayload {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(regex(path = *PHONE_RE, message = "A valid Turkish phone number is required"))]
    pub phone: String,
    #[validate(length(min = 1, max = 200, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,
}

/// Request body for the read-flag toggle.
#[derive(Debug, Deserialize)]
pub struct MarkReadPayload {
    pub is_read: bool,
}

/// POST /api/v1/contact
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> AppResult<StatusCode> {
    payload.validate()?;

    let input = CreateContactMessage {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        subject: payload.subject,
        message: payload.message,
    };
    ContactRepo::create(&state.pool, &input).await?;

    Ok(StatusCode::CREATED)
}

/// GET /api/v1/contact
pub async fn list(
    _admin: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ContactMessage>>>> {
    let messages = ContactRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// PUT /api/v1/contact/{id}
pub async fn mark_read(
    _admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(payload): Json<MarkReadPayload>,
) -> AppResult<Json<DataResponse<ContactMessage>>> {
    let message = ContactRepo::set_read(&state.pool, id, payload.is_read)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContactMessage",
            id,
        }))?;
    Ok(Json(DataResponse { data: message }))
}

/// DELETE /api/v1/contact/{id}
pub async fn delete(
    _admin: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ContactRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ContactMessage",
            id,
        }))
    }
}
