//! Project-wide task publication gate.
//!
//! Publication is strictly all-or-nothing per project: one bulk UPDATE
//! flips the `published` flag on every task. A flip that touches zero rows
//! is reported as a failure, whether the project is empty or the update
//! went wrong; callers cannot tell the two apart.

use sqlx::SqlitePool;

use crate::db;
use crate::error::{Result, SiteworkError};
use crate::models::event::{CreateEvent, EntityType, EventType};
use crate::services::task_service::record_event;

/// Set published=true on every task in the project.
pub async fn publish_all(pool: &SqlitePool, project_id: i64) -> Result<u64> {
    let _project = crate::services::get_project(pool, project_id).await?;

    let affected = db::tasks::set_published(pool, project_id, true).await?;
    if affected == 0 {
        return Err(SiteworkError::NothingPublished(project_id));
    }

    record_event(
        pool,
        CreateEvent {
            event_type: EventType::TasksPublished,
            entity_type: EntityType::Project,
            entity_id: project_id,
            payload: serde_json::json!({ "tasks": affected }),
        },
    )
    .await;

    Ok(affected)
}

/// Set published=false on every task in the project.
pub async fn unpublish_all(pool: &SqlitePool, project_id: i64) -> Result<u64> {
    let _project = crate::services::get_project(pool, project_id).await?;

    let affected = db::tasks::set_published(pool, project_id, false).await?;
    if affected == 0 {
        return Err(SiteworkError::NothingUnpublished(project_id));
    }

    record_event(
        pool,
        CreateEvent {
            event_type: EventType::TasksUnpublished,
            entity_type: EntityType::Project,
            entity_id: project_id,
            payload: serde_json::json!({ "tasks": affected }),
        },
    )
    .await;

    Ok(affected)
}
