//! Project endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use sitework_types::{CreateProject, Project};

use super::AppState;
use super::error::ApiResult;
use crate::services;

/// POST /api/projects
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateProject>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let project = services::create_project(&state.pool, input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list_projects(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Project>>> {
    let projects = services::list_projects(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/projects/:projectId
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<Project>> {
    let project = services::get_project(&state.pool, project_id).await?;
    Ok(Json(project))
}
