/// In-memory store backend
///
/// Keeps users and tasks in vectors behind one `tokio::sync::RwLock`. IDs are
/// assigned from per-table counters starting at 1, mirroring `BIGSERIAL`.
/// Uniqueness checks and inserts happen under the same write guard, which is
/// what makes `create_user` atomic here.
///
/// Data lives for the lifetime of the process.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Store, StoreError, TaskStore, UserDirectory};
use crate::models::{
    task::{CreateTask, Task},
    user::{CreateUser, User},
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    tasks: Vec<Task>,
    next_user_id: i64,
    next_task_id: i64,
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;

        let taken = tables
            .users
            .iter()
            .any(|u| u.username == data.username || u.email == data.email);
        if taken {
            return Err(StoreError::DuplicateUser);
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Task>, StoreError> {
        let tables = self.tables.read().await;

        // Vec order is insertion order
        Ok(tables
            .tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError> {
        let mut tables = self.tables.write().await;

        tables.next_task_id += 1;
        let task = Task {
            id: tables.next_task_id,
            name: data.name,
            is_active: true,
            user_id: data.user_id,
            created_at: Utc::now(),
        };
        tables.tasks.push(task.clone());

        Ok(task)
    }

    async fn toggle_active(
        &self,
        task_id: i64,
        user_id: i64,
    ) -> Result<Option<Task>, StoreError> {
        let mut tables = self.tables.write().await;

        Ok(tables
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id && t.user_id == user_id)
            .map(|task| {
                task.is_active = !task.is_active;
                task.clone()
            }))
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
