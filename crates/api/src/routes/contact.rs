//! Route definitions for the `/contact` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/contact`.
///
/// ```text
/// POST   /      -> submit (public)
/// GET    /      -> list
/// PUT    /{id}  -> mark_read
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list).post(contact::submit))
        .route(
            "/{id}",
            axum::routing::put(contact::mark_read).delete(contact::delete),
        )
}
