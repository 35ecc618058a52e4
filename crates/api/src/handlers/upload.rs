//! Handler for gallery image uploads.
//!
//! Accepts one multipart `file` field, normalizes it through the core
//! image transform, and stores the result under a fresh object key. The
//! response carries everything the project form needs to submit the image
//! later (url, path, dimensions, size).

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use signworks_core::media;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum accepted upload size in bytes (10 MiB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Accepted upload content types.
const ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Response payload for a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub url: String,
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub size: usize,
}

/// POST /api/v1/uploads
pub async fn upload(
    _admin: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<UploadedImage>>> {
    let mut file_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("File field has no content type".into()))?;
        if !ALLOWED_TYPES.contains(&content_type.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Unsupported file type '{content_type}'. Allowed: JPEG, PNG, WebP"
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::BadRequest(
                "File exceeds the 10 MiB upload limit".into(),
            ));
        }

        file_bytes = Some(data);
        break;
    }

    let data =
        file_bytes.ok_or_else(|| AppError::BadRequest("No 'file' field in upload".into()))?;

    let processed = media::process_upload(&data)?;
    let (width, height, size) = (processed.width, processed.height, processed.size());

    let path = format!("projects/{}.{}", Uuid::now_v7(), media::OUTPUT_EXTENSION);
    state
        .storage
        .upload(&path, processed.bytes, media::OUTPUT_CONTENT_TYPE)
        .await?;
    let url = state.storage.public_url(&path);

    tracing::info!(path = %path, size, "Stored gallery upload");

    Ok(Json(DataResponse {
        data: UploadedImage {
            url,
            path,
            width,
            height,
            size,
        },
    }))
}
