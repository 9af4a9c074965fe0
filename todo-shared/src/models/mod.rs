/// Database models
///
/// # Models
///
/// - `user`: User accounts and credentials
/// - `task`: To-do items owned by a single user
///
/// These types are shared by every store backend; the associated functions
/// on each model are the Postgres implementation.

pub mod task;
pub mod user;
