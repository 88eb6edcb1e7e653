/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: Signup and login
/// - `projects`: Project CRUD and "my projects"
/// - `tasks`: Task CRUD, assignment and "my tasks"

pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;
