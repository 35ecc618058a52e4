//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Where the resource is updated by full replacement (the admin forms
//!   always submit every field), the create DTO doubles as the update DTO

pub mod about;
pub mod category;
pub mod contact;
pub mod project;
pub mod setting;
pub mod user;
