//! Route definitions for the `/settings` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::setting;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET /        -> list
/// PUT /{key}   -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(setting::list))
        .route("/{key}", put(setting::update))
}
