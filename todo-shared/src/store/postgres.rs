/// Postgres store backend
///
/// Thin adapter from the store traits onto the model functions in
/// [`crate::models`]. The only translation is classifying unique violations on
/// `users` as [`StoreError::DuplicateUser`].

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{Store, StoreError, TaskStore, UserDirectory};
use crate::db::pool;
use crate::models::{
    task::{CreateTask, Task},
    user::{CreateUser, User},
};

/// Store backed by a Postgres connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn classify_user_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            debug!(constraint = ?db_err.constraint(), "User insert hit unique constraint");
            return StoreError::DuplicateUser;
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserDirectory for PgStore {
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError> {
        User::create(&self.pool, data)
            .await
            .map_err(classify_user_insert_error)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(User::find_by_username(&self.pool, username).await?)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Task>, StoreError> {
        Ok(Task::list_by_user(&self.pool, user_id).await?)
    }

    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError> {
        Ok(Task::create(&self.pool, data).await?)
    }

    async fn toggle_active(
        &self,
        task_id: i64,
        user_id: i64,
    ) -> Result<Option<Task>, StoreError> {
        Ok(Task::toggle_active(&self.pool, task_id, user_id).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(pool::health_check(&self.pool).await?)
    }
}
