/// Project endpoints (bearer auth)
///
/// - `POST   /users/create-project`
/// - `POST   /users/update-project/:project_id`
/// - `DELETE /users/delete-project/:project_id`
/// - `GET    /users/get-my-projects`
///
/// Update and delete are limited to the project's creator. A project owned
/// by someone else answers exactly like a missing one.

use crate::{
    app::AppState,
    error::{validate, ApiResult},
    extract::{AppJson, AppPath, AppQuery},
    response::{ApiResponse, Empty},
};
use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{authorization::require_owner, middleware::CurrentUser},
    models::project::{CreateProject, Project, ProjectStatus, UpdateProject},
    query::{my_projects, ListParams, Paginated},
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

/// Update project request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,

    pub status: Option<ProjectStatus>,
}

impl From<UpdateProjectRequest> for UpdateProject {
    fn from(req: UpdateProjectRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            status: req.status,
        }
    }
}

/// Created project payload
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub project: Project,
}

/// Create a project owned by the caller
pub async fn create_project(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(req): AppJson<CreateProjectRequest>,
) -> ApiResult<ApiResponse<ProjectResponse>> {
    validate(&req)?;

    let project = Project::create(
        &state.db,
        CreateProject {
            title: req.title,
            description: req.description,
            created_by: user.id,
        },
    )
    .await?;

    info!(user_id = %user.id, project_id = %project.id, "Project created");

    Ok(ApiResponse::created(ProjectResponse { project })
        .with_message("Project created successfully."))
}

/// Update title, description or status of one of the caller's projects
///
/// # Errors
///
/// - `400 Bad Request`: Malformed id or body, unknown status
/// - `404 Not Found`: Project missing or owned by another user
pub async fn update_project(
    State(state): State<AppState>,
    user: CurrentUser,
    AppPath(project_id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateProjectRequest>,
) -> ApiResult<ApiResponse<Empty>> {
    validate(&req)?;

    let project = require_owner(
        Project::find_by_id(&state.db, project_id).await?,
        user.id,
        "Project",
    )?;

    let changes = UpdateProject::from(req);
    if !changes.is_empty() {
        Project::update(&state.db, project.id, changes).await?;
    }

    info!(user_id = %user.id, project_id = %project.id, "Project updated");

    Ok(ApiResponse::message(
        StatusCode::CREATED,
        "Project updated successfully.",
    ))
}

/// Soft-delete one of the caller's projects
///
/// Tasks of the project are left as they are; they drop out of
/// "my tasks" because the join requires a live project.
pub async fn delete_project(
    State(state): State<AppState>,
    user: CurrentUser,
    AppPath(project_id): AppPath<Uuid>,
) -> ApiResult<ApiResponse<Empty>> {
    let project = require_owner(
        Project::find_by_id(&state.db, project_id).await?,
        user.id,
        "Project",
    )?;

    Project::soft_delete(&state.db, project.id).await?;

    info!(user_id = %user.id, project_id = %project.id, "Project deleted");

    Ok(ApiResponse::message(
        StatusCode::CREATED,
        "Project deleted successfully.",
    ))
}

/// Page through live projects that contain a task assigned to the caller
///
/// ```text
/// GET /users/get-my-projects?search=alpha&status=active&page=1&limit=10
/// ```
pub async fn get_my_projects(
    State(state): State<AppState>,
    user: CurrentUser,
    AppQuery(params): AppQuery<ListParams>,
) -> ApiResult<ApiResponse<Paginated<Project>>> {
    let page = my_projects::get_my_projects(&state.db, user.id, &params.normalized()?).await?;
    Ok(ApiResponse::ok(page))
}
