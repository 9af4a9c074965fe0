/// Persistence interface
///
/// Handlers and the session resolver talk to storage only through these
/// traits, so the same flows run against Postgres in production and against
/// [`MemoryStore`] in tests or database-less local runs.
///
/// # Backends
///
/// - [`PgStore`]: sqlx/Postgres, delegating to the model functions
/// - [`MemoryStore`]: process-local, behind a `tokio::sync::RwLock`
///
/// # Ownership
///
/// Every [`TaskStore`] method that reads or mutates a task takes the owning
/// user's ID. Implementations must never return or modify a task whose
/// `user_id` differs from it.

use async_trait::async_trait;

use crate::models::{
    task::{CreateTask, Task},
    user::{CreateUser, User},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Username or email already taken; nothing was written
    #[error("Username or email already exists")]
    DuplicateUser,

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Lookup and creation of user accounts
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Creates a user, failing with [`StoreError::DuplicateUser`] if the
    /// username or email is taken
    ///
    /// Must be atomic: on failure no partial row is left behind.
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError>;

    /// Case-sensitive lookup by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Lookup by ID
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
}

/// Owner-scoped task persistence
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Tasks owned by `user_id`, oldest first
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Task>, StoreError>;

    /// Creates an active task
    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError>;

    /// Flips the active flag if `task_id` exists and is owned by `user_id`
    ///
    /// Returns `Ok(None)` without mutating anything otherwise.
    async fn toggle_active(&self, task_id: i64, user_id: i64)
        -> Result<Option<Task>, StoreError>;
}

/// A complete storage backend
#[async_trait]
pub trait Store: UserDirectory + TaskStore {
    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Checks the backend is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}
