//! Request handlers, one module per resource.

pub mod about;
pub mod auth;
pub mod category;
pub mod contact;
pub mod dashboard;
pub mod project;
pub mod setting;
pub mod upload;
