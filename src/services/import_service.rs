//! Bulk import of externally authored project plans.
//!
//! Items arrive as a flat list; each one needs a name and both dates to be
//! materialized, and its completion percentage decides the initial status.
//! Creation is sequential and deliberately not transactional: a failure
//! partway through leaves the earlier tasks committed.

use sitework_types::{CreateTask, ImportSummary, PlanItem, TaskStatus};
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::event::{CreateEvent, EntityType, EventType};
use crate::services::task_service::{create_task, record_event};

/// Materialize plan items as tasks, in input order.
/// Items missing name, start, or end are skipped without error.
pub async fn import_plan(
    pool: &SqlitePool,
    project_id: i64,
    items: Vec<PlanItem>,
) -> Result<ImportSummary> {
    let _project = crate::services::get_project(pool, project_id).await?;

    let mut created = Vec::new();
    let mut skipped = 0usize;

    for item in items {
        let Some((name, start, end)) = required_fields(&item) else {
            skipped += 1;
            continue;
        };

        let percent = item.progress.unwrap_or(0).clamp(0, 100);
        let input = CreateTask {
            title: name,
            description: item.description,
            status: Some(TaskStatus::from_percent(percent)),
            progress: Some(percent),
            start_date: Some(start),
            due_date: Some(end),
            ..CreateTask::default()
        };

        let task = create_task(pool, project_id, input).await?;
        created.push(task);
    }

    record_event(
        pool,
        CreateEvent {
            event_type: EventType::TasksImported,
            entity_type: EntityType::Project,
            entity_id: project_id,
            payload: serde_json::json!({
                "created": created.len(),
                "skipped": skipped,
            }),
        },
    )
    .await;

    Ok(ImportSummary {
        created: created.len(),
        skipped,
        tasks: created,
    })
}

/// The item's name and both dates, or None when any is missing or blank.
fn required_fields(item: &PlanItem) -> Option<(String, String, String)> {
    let name = item.name.as_deref()?.trim();
    let start = item.start.as_deref()?.trim();
    let end = item.end.as_deref()?.trim();
    if name.is_empty() || start.is_empty() || end.is_empty() {
        return None;
    }
    Some((name.to_string(), start.to_string(), end.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: Option<&str>, start: Option<&str>, end: Option<&str>) -> PlanItem {
        PlanItem {
            name: name.map(String::from),
            start: start.map(String::from),
            end: end.map(String::from),
            ..PlanItem::default()
        }
    }

    #[test]
    fn complete_items_pass() {
        let it = item(Some("pour slab"), Some("2025-01-06"), Some("2025-01-10"));
        assert!(required_fields(&it).is_some());
    }

    #[test]
    fn missing_or_blank_fields_skip() {
        assert!(required_fields(&item(None, Some("2025-01-06"), Some("2025-01-10"))).is_none());
        assert!(required_fields(&item(Some("rough-in"), None, Some("2025-01-10"))).is_none());
        assert!(required_fields(&item(Some("rough-in"), Some("2025-01-06"), None)).is_none());
        assert!(required_fields(&item(Some("  "), Some("2025-01-06"), Some("2025-01-10"))).is_none());
    }
}
