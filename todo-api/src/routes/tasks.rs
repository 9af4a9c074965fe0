/// Task endpoints
///
/// All routes here sit behind the session middleware, so every handler
/// receives the resolved [`CurrentUser`] and only ever touches that user's
/// tasks.
///
/// # Endpoints
///
/// - `GET /todo` - Task list page
/// - `POST /add_task` - Create a task
/// - `POST /toggle_task/:task_id` - Flip a task between active and done

use crate::{
    app::AppState,
    error::ApiResult,
    middleware::session::CurrentUser,
    views,
};
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Extension, Form,
};
use serde::Deserialize;
use todo_shared::models::task::CreateTask;
use tracing::{debug, info};
use validator::Validate;

/// Add-task form
#[derive(Debug, Deserialize, Validate)]
pub struct AddTaskForm {
    /// Task name; `name` is accepted as an alias
    #[serde(alias = "name")]
    #[validate(length(min = 1, max = 500, message = "Task name must be 1-500 characters"))]
    pub task_name: String,
}

/// Render the current user's tasks in creation order
pub async fn show_tasks(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Html<String>> {
    let tasks = state.tasks.list_for_user(user.id).await?;
    Ok(views::todo_page(&user, &tasks))
}

/// Create an active task owned by the current user
///
/// The name is stored with surrounding whitespace trimmed.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Name empty or whitespace only
pub async fn add_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(mut form): Form<AddTaskForm>,
) -> ApiResult<Redirect> {
    form.task_name = form.task_name.trim().to_string();
    form.validate()?;

    let task = state
        .tasks
        .create_task(CreateTask {
            name: form.task_name,
            user_id: user.id,
        })
        .await?;

    info!(task_id = task.id, user_id = user.id, "Task created");
    Ok(Redirect::to("/todo"))
}

/// Toggle a task's active flag
///
/// Tasks that do not exist or belong to someone else are left alone; the
/// response is the same redirect either way.
pub async fn toggle_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(task_id): Path<i64>,
) -> ApiResult<Redirect> {
    match state.tasks.toggle_active(task_id, user.id).await? {
        Some(task) => debug!(task_id, is_active = task.is_active, "Task toggled"),
        None => debug!(task_id, user_id = user.id, "Toggle ignored: task not owned"),
    }

    Ok(Redirect::to("/todo"))
}
