/// Database models for Taskboard
///
/// Each model owns its table and exposes its CRUD operations as associated
/// functions taking a `&PgPool`.
///
/// # Models
///
/// - `user`: Accounts, soft-deleted through `deleted_at`
/// - `project`: Projects owned by their creator
/// - `task`: Tasks belonging to a project
/// - `assignment`: Append-only user ↔ task links
///
/// Cross-table read views ("my tasks", "my projects") live in [`crate::query`].

pub mod assignment;
pub mod project;
pub mod task;
pub mod user;

/// A status string read from the database that no enum variant matches
#[derive(Debug, thiserror::Error)]
#[error("Unknown status: {0}")]
pub struct UnknownStatus(pub String);
