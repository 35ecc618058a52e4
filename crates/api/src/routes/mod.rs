//! Route definitions, one module per resource.

pub mod about;
pub mod auth;
pub mod category;
pub mod contact;
pub mod health;
pub mod project;
pub mod setting;
pub mod upload;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     login (public)
/// /auth/me                        current user
///
/// /categories                     list, create
/// /categories/tree                grouped public navigation
/// /categories/{id}                update, delete
/// /categories/{id}/related        related categories with project counts
///
/// /projects                       list (filterable), create
/// /projects/{id}                  get, update, delete
/// /projects/slug/{slug}           public detail lookup
///
/// /uploads                        multipart image upload
///
/// /contact                        submit (public), list
/// /contact/{id}                   read-flag toggle, delete
///
/// /settings                       list
/// /settings/{key}                 value update
///
/// /about                          get, update
///
/// /dashboard                      admin counters
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", category::router())
        .nest("/projects", project::router())
        .nest("/uploads", upload::router())
        .nest("/contact", contact::router())
        .nest("/settings", setting::router())
        .nest("/about", about::router())
        .route("/dashboard", get(handlers::dashboard::stats))
}
