use sitework_types::{CreateProject, Project};
use sqlx::SqlitePool;

use crate::db;
use crate::error::{Result, SiteworkError};
use crate::models::event::{CreateEvent, EntityType, EventType};
use crate::services::task_service::record_event;

/// Create a new project. Progress starts at 0 and is owned by the
/// aggregator from then on.
pub async fn create_project(pool: &SqlitePool, input: CreateProject) -> Result<Project> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(SiteworkError::validation("name", "must not be empty"));
    }

    let project = db::projects::create(pool, name, input.description.as_deref()).await?;

    record_event(
        pool,
        CreateEvent {
            event_type: EventType::ProjectCreated,
            entity_type: EntityType::Project,
            entity_id: project.id,
            payload: serde_json::json!({ "name": project.name }),
        },
    )
    .await;

    Ok(project)
}

/// Get a project by ID
pub async fn get_project(pool: &SqlitePool, id: i64) -> Result<Project> {
    db::projects::get(pool, id)
        .await?
        .ok_or(SiteworkError::ProjectNotFound(id))
}

/// List all projects
pub async fn list_projects(pool: &SqlitePool) -> Result<Vec<Project>> {
    db::projects::list(pool).await
}
