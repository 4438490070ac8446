//! Task, dependency, publication, and import endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use sitework_types::{
    CreateTask, DependencyRef, ImportSummary, PlanItem, Task, TaskDependency, TaskWithAssignee,
    UpdateTask,
};

use super::AppState;
use super::error::ApiResult;
use crate::services;

/// GET /api/projects/:projectId/tasks
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<Vec<TaskWithAssignee>>> {
    let tasks = services::list_tasks(&state.pool, project_id).await?;
    Ok(Json(tasks))
}

/// POST /api/projects/:projectId/tasks
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
    Json(input): Json<CreateTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = services::create_task(&state.pool, project_id, input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/projects/:projectId/tasks/:taskId
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path((_project_id, task_id)): Path<(i64, i64)>,
    Json(updates): Json<UpdateTask>,
) -> ApiResult<Json<Task>> {
    let task = services::update_task(&state.pool, &state.billing, task_id, updates).await?;
    Ok(Json(task))
}

/// DELETE /api/projects/:projectId/tasks/:taskId
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path((_project_id, task_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    services::delete_task(&state.pool, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/projects/:projectId/tasks/dependencies
pub async fn list_dependencies(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<Vec<TaskDependency>>> {
    let edges = services::list_dependencies_for_project(&state.pool, project_id).await?;
    Ok(Json(edges))
}

/// POST /api/projects/:projectId/tasks/dependencies
///
/// Re-posting an existing pair answers 200 with the original edge instead
/// of 201.
pub async fn add_dependency(
    State(state): State<Arc<AppState>>,
    Path(_project_id): Path<i64>,
    Json(body): Json<DependencyRef>,
) -> ApiResult<(StatusCode, Json<TaskDependency>)> {
    let (edge, created) =
        services::add_dependency(&state.pool, body.predecessor_id, body.successor_id).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(edge)))
}

/// DELETE /api/projects/:projectId/tasks/dependencies
pub async fn remove_dependency(
    State(state): State<Arc<AppState>>,
    Path(_project_id): Path<i64>,
    Json(body): Json<DependencyRef>,
) -> ApiResult<StatusCode> {
    services::remove_dependency(&state.pool, body.predecessor_id, body.successor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Body of publish/unpublish responses.
#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub published: bool,
    pub tasks: u64,
}

/// POST /api/projects/:projectId/tasks/publish
pub async fn publish_all(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<PublishResponse>> {
    let tasks = services::publish_all(&state.pool, project_id).await?;
    Ok(Json(PublishResponse {
        published: true,
        tasks,
    }))
}

/// POST /api/projects/:projectId/tasks/unpublish
pub async fn unpublish_all(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<PublishResponse>> {
    let tasks = services::unpublish_all(&state.pool, project_id).await?;
    Ok(Json(PublishResponse {
        published: false,
        tasks,
    }))
}

/// POST /api/projects/:projectId/tasks/import
pub async fn import_plan(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
    Json(items): Json<Vec<PlanItem>>,
) -> ApiResult<Json<ImportSummary>> {
    let summary = services::import_plan(&state.pool, project_id, items).await?;
    Ok(Json(summary))
}
