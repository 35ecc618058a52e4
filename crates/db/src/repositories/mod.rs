//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod about_repo;
pub mod category_repo;
pub mod contact_repo;
pub mod project_image_repo;
pub mod project_repo;
pub mod setting_repo;
pub mod user_repo;

pub use about_repo::AboutRepo;
pub use category_repo::CategoryRepo;
pub use contact_repo::ContactRepo;
pub use project_image_repo::ProjectImageRepo;
pub use project_repo::ProjectRepo;
pub use setting_repo::SettingRepo;
pub use user_repo::UserRepo;
