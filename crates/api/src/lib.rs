//! HTTP service for the Signworks backend.
//!
//! Public marketing endpoints (projects, categories, settings, about,
//! contact form) plus the authenticated admin surface (CRUD, uploads,
//! dashboard). Routing is split per resource under `routes`, handler
//! functions under `handlers`.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
