//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod application_repo;
pub mod category_repo;
pub mod chat_repo;
pub mod event_repo;
pub mod job_repo;
pub mod notification_repo;
pub mod report_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use application_repo::ApplicationRepo;
pub use category_repo::CategoryRepo;
pub use chat_repo::ChatRepo;
pub use event_repo::EventRepo;
pub use job_repo::JobRepo;
pub use notification_repo::NotificationRepo;
pub use report_repo::ReportRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
