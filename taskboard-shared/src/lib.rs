//! # Taskboard Shared Library
//!
//! Stores, auth primitives and read views used by the Taskboard API server
//! and the seed tool.
//!
//! ## Module Organization
//!
//! - `models`: Users, projects, tasks and assignments
//! - `auth`: Password hashing, tokens, bearer resolution, ownership
//! - `db`: Connection pool and schema bootstrap
//! - `query`: Paginated "my tasks" / "my projects" views

pub mod auth;
pub mod db;
pub mod models;
pub mod query;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
