use sitework_types::TaskDependency;
use sqlx::SqlitePool;

use crate::db;
use crate::error::{FieldError, Result, SiteworkError};
use crate::models::event::{CreateEvent, EntityType, EventType};
use crate::services::task_service::{get_task, record_event};

/// Add a directed edge between two tasks.
///
/// Creating the same ordered pair twice returns the original edge rather
/// than erroring; the storage-level unique constraint backs this up under
/// concurrent duplicate creates. Self-loops and cycles are not rejected.
/// The returned flag is true when the edge was newly inserted.
pub async fn add_dependency(
    pool: &SqlitePool,
    predecessor_id: i64,
    successor_id: i64,
) -> Result<(TaskDependency, bool)> {
    validate_ids(predecessor_id, successor_id)?;

    // Verify both endpoints exist
    let _predecessor = get_task(pool, predecessor_id).await?;
    let _successor = get_task(pool, successor_id).await?;

    let existing = db::dependencies::get_by_pair(pool, predecessor_id, successor_id).await?;
    let edge = db::dependencies::add(pool, predecessor_id, successor_id).await?;

    if existing.is_none() {
        record_event(
            pool,
            CreateEvent {
                event_type: EventType::DependencyAdded,
                entity_type: EntityType::Dependency,
                entity_id: edge.id,
                payload: serde_json::json!({
                    "predecessor_id": predecessor_id,
                    "successor_id": successor_id,
                }),
            },
        )
        .await;
    }

    let created = existing.is_none();
    Ok((edge, created))
}

/// Remove an edge by its ordered pair.
pub async fn remove_dependency(
    pool: &SqlitePool,
    predecessor_id: i64,
    successor_id: i64,
) -> Result<()> {
    validate_ids(predecessor_id, successor_id)?;

    let removed = db::dependencies::remove(pool, predecessor_id, successor_id).await?;
    if !removed {
        return Err(SiteworkError::DependencyNotFound {
            predecessor_id,
            successor_id,
        });
    }

    record_event(
        pool,
        CreateEvent {
            event_type: EventType::DependencyRemoved,
            entity_type: EntityType::Dependency,
            entity_id: predecessor_id,
            payload: serde_json::json!({
                "predecessor_id": predecessor_id,
                "successor_id": successor_id,
            }),
        },
    )
    .await;

    Ok(())
}

/// Edges originating at the task.
pub async fn list_dependencies_for_task(
    pool: &SqlitePool,
    task_id: i64,
) -> Result<Vec<TaskDependency>> {
    let _task = get_task(pool, task_id).await?;
    db::dependencies::list_for_task(pool, task_id).await
}

/// Every edge touching the project's tasks, for graph rendering.
pub async fn list_dependencies_for_project(
    pool: &SqlitePool,
    project_id: i64,
) -> Result<Vec<TaskDependency>> {
    let _project = crate::services::get_project(pool, project_id).await?;
    db::dependencies::list_for_project(pool, project_id).await
}

fn validate_ids(predecessor_id: i64, successor_id: i64) -> Result<()> {
    let mut fields = Vec::new();
    if predecessor_id <= 0 {
        fields.push(FieldError::new(
            "predecessorId",
            "must be a positive integer",
        ));
    }
    if successor_id <= 0 {
        fields.push(FieldError::new("successorId", "must be a positive integer"));
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(SiteworkError::Validation {
            message: "dependency endpoints must be positive integers".to_string(),
            fields,
        })
    }
}
