/// Task model and database operations
///
/// A task belongs to exactly one user. Every query that reads or mutates tasks
/// takes the owning user's ID and filters on it, so a user can never see or
/// change another user's tasks through this module.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     name TEXT NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use todo_shared::models::task::{Task, CreateTask};
/// use todo_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example(user_id: i64) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     name: "buy milk".to_string(),
///     user_id,
/// }).await?;
/// assert!(task.is_active);
///
/// // Owner flips it
/// let toggled = Task::toggle_active(&pool, task.id, user_id).await?;
/// assert_eq!(toggled.map(|t| t.is_active), Some(false));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// To-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Task description
    pub name: String,

    /// Whether the task is still open
    pub is_active: bool,

    /// Owning user
    pub user_id: i64,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task description
    pub name: String,

    /// Owning user
    pub user_id: i64,
}

impl Task {
    /// Creates a new active task
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (name, user_id)
            VALUES ($1, $2)
            RETURNING id, name, is_active, user_id, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists a user's tasks in creation order
    pub async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, is_active, user_id, created_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Flips the active flag of a task owned by `user_id`
    ///
    /// A single conditional UPDATE: if the task does not exist or belongs to
    /// someone else, no row matches and `None` is returned.
    pub async fn toggle_active(
        pool: &PgPool,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET is_active = NOT is_active
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, is_active, user_id, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_struct() {
        let create = CreateTask {
            name: "buy milk".to_string(),
            user_id: 7,
        };

        assert_eq!(create.name, "buy milk");
        assert_eq!(create.user_id, 7);
    }
}
