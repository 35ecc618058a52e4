//! Route definitions for the upload endpoint.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Multipart framing overhead allowed on top of the file size limit.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST /  -> upload (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload::upload))
        .layer(DefaultBodyLimit::max(upload::MAX_FILE_SIZE + BODY_LIMIT_SLACK))
}
