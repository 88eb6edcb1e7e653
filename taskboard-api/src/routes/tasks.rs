/// Task endpoints (bearer auth)
///
/// - `POST   /users/create-task`
/// - `POST   /users/update-task/:task_id`
/// - `DELETE /users/delete-task/:task_id`
/// - `POST   /users/assign-task/:task_id`
/// - `GET    /users/get-my-tasks`
///
/// Only a task's creator may update, delete or assign it. The project id on
/// create and update is stored as given; it is not checked for existence.

use crate::{
    app::AppState,
    error::{validate, ApiError, ApiResult},
    extract::{AppJson, AppPath, AppQuery},
    response::{ApiResponse, Empty},
};
use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{authorization::require_owner, middleware::CurrentUser},
    models::{
        assignment::Assignment,
        task::{CreateTask, Task, TaskStatus, UpdateTask},
        user::User,
    },
    query::{
        my_tasks::{self, MyTask},
        ListParams, Paginated,
    },
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub project_id: Uuid,
}

/// Update task request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,

    pub project_id: Option<Uuid>,

    pub status: Option<TaskStatus>,
}

impl From<UpdateTaskRequest> for UpdateTask {
    fn from(req: UpdateTaskRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            project_id: req.project_id,
            status: req.status,
        }
    }
}

/// Assign task request
#[derive(Debug, Deserialize)]
pub struct AssignTaskRequest {
    /// User receiving the task
    pub user_id: Uuid,
}

/// Created task payload
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task: Task,
}

/// Create a task owned by the caller
pub async fn create_task(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(req): AppJson<CreateTaskRequest>,
) -> ApiResult<ApiResponse<TaskResponse>> {
    validate(&req)?;

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            project_id: req.project_id,
            created_by: user.id,
        },
    )
    .await?;

    info!(
        user_id = %user.id,
        task_id = %task.id,
        project_id = %task.project_id,
        "Task created"
    );

    Ok(ApiResponse::created(TaskResponse { task }).with_message("Task created successfully."))
}

/// Update one of the caller's tasks
///
/// # Errors
///
/// - `400 Bad Request`: Malformed id or body, unknown status
/// - `404 Not Found`: Task missing or owned by another user
pub async fn update_task(
    State(state): State<AppState>,
    user: CurrentUser,
    AppPath(task_id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateTaskRequest>,
) -> ApiResult<ApiResponse<Empty>> {
    validate(&req)?;

    let task = require_owner(Task::find_by_id(&state.db, task_id).await?, user.id, "Task")?;

    Task::update(&state.db, task.id, UpdateTask::from(req)).await?;

    info!(user_id = %user.id, task_id = %task.id, "Task updated");

    Ok(ApiResponse::message(
        StatusCode::CREATED,
        "Task updated successfully.",
    ))
}

/// Soft-delete one of the caller's tasks
pub async fn delete_task(
    State(state): State<AppState>,
    user: CurrentUser,
    AppPath(task_id): AppPath<Uuid>,
) -> ApiResult<ApiResponse<Empty>> {
    let task = require_owner(Task::find_by_id(&state.db, task_id).await?, user.id, "Task")?;

    Task::soft_delete(&state.db, task.id).await?;

    info!(user_id = %user.id, task_id = %task.id, "Task deleted");

    Ok(ApiResponse::message(
        StatusCode::CREATED,
        "Task deleted successfully.",
    ))
}

/// Assign one of the caller's tasks to a user
///
/// The assignee is stored without a lookup unless
/// `ASSIGN_REQUIRE_ACTIVE_USER` is set, in which case a missing or deleted
/// user is a 404.
pub async fn assign_task(
    State(state): State<AppState>,
    user: CurrentUser,
    AppPath(task_id): AppPath<Uuid>,
    AppJson(req): AppJson<AssignTaskRequest>,
) -> ApiResult<ApiResponse<Empty>> {
    let task = require_owner(Task::find_by_id(&state.db, task_id).await?, user.id, "Task")?;

    if state.config.rules.assign_require_active_user
        && User::find_active_by_id(&state.db, req.user_id).await?.is_none()
    {
        return Err(ApiError::NotFound("User not found.".to_string()));
    }

    let assignment = Assignment::create(&state.db, req.user_id, task.id).await?;

    info!(
        user_id = %user.id,
        task_id = %task.id,
        assignee_id = %assignment.user_id,
        "Task assigned"
    );

    Ok(ApiResponse::message(
        StatusCode::CREATED,
        "Task assigned successfully.",
    ))
}

/// Page through tasks assigned to the caller
///
/// ```text
/// GET /users/get-my-tasks?search=report&status=todo&page=1&limit=10
/// ```
pub async fn get_my_tasks(
    State(state): State<AppState>,
    user: CurrentUser,
    AppQuery(params): AppQuery<ListParams>,
) -> ApiResult<ApiResponse<Paginated<MyTask>>> {
    let page = my_tasks::get_my_tasks(&state.db, user.id, &params.normalized()?).await?;
    Ok(ApiResponse::ok(page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_accepts_kebab_status() {
        let req: UpdateTaskRequest =
            serde_json::from_str(r#"{ "status": "in-progress" }"#).unwrap();
        assert_eq!(UpdateTask::from(req).status, Some(TaskStatus::InProgress));
    }

    #[test]
    fn test_create_request_requires_uuid_project() {
        let parsed = serde_json::from_str::<CreateTaskRequest>(
            r#"{ "title": "t", "description": "d", "project_id": "not-a-uuid" }"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_assign_request() {
        let user_id = Uuid::new_v4();
        let req: AssignTaskRequest =
            serde_json::from_value(serde_json::json!({ "user_id": user_id })).unwrap();
        assert_eq!(req.user_id, user_id);
    }
}
