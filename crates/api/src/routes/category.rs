//! Route definitions for the `/categories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /tree          -> tree
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// GET    /{id}/related  -> related
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::list).post(category::create))
        .route("/tree", get(category::tree))
        .route(
            "/{id}",
            axum::routing::put(category::update).delete(category::delete),
        )
        .route("/{id}/related", get(category::related))
}
