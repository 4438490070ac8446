use sitework_types::{CreateTask, Task, TaskStatus, TaskWithAssignee, UpdateTask};
use sqlx::SqlitePool;

use crate::db;
use crate::error::{Result, SiteworkError};
use crate::models::event::{CreateEvent, EntityType, EventType};
use crate::services::billing::{BillableCompletion, BillingNotifier};
use crate::services::progress;

/// Create a new task in a project
pub async fn create_task(pool: &SqlitePool, project_id: i64, input: CreateTask) -> Result<Task> {
    // Verify project exists
    let _project = crate::services::get_project(pool, project_id).await?;

    let title = input.title.trim();
    if title.is_empty() {
        return Err(SiteworkError::validation("title", "must not be empty"));
    }

    let new = db::tasks::NewTask {
        project_id,
        parent_task_id: input.parent_task_id,
        title: title.to_string(),
        description: input.description,
        status: input.status.unwrap_or_default().as_str().to_string(),
        priority: input.priority.unwrap_or_default().as_str().to_string(),
        assignee_id: input.assignee_id,
        start_date: normalize_date("startDate", input.start_date)?,
        due_date: normalize_date("dueDate", input.due_date)?,
        progress: validate_percent("progress", input.progress.unwrap_or(0))?,
        sort_order: input.sort_order.unwrap_or(0),
        is_billable: input.is_billable.unwrap_or(false),
    };

    let task = db::tasks::create(pool, &new).await?;

    record_event(
        pool,
        CreateEvent {
            event_type: EventType::TaskCreated,
            entity_type: EntityType::Task,
            entity_id: task.id,
            payload: serde_json::json!({
                "title": task.title,
                "project_id": task.project_id,
            }),
        },
    )
    .await;

    Ok(task)
}

/// Get a task by ID
pub async fn get_task(pool: &SqlitePool, id: i64) -> Result<Task> {
    db::tasks::get(pool, id)
        .await?
        .ok_or(SiteworkError::TaskNotFound(id))
}

/// List tasks in a project with their assignees resolved from the user
/// directory. The full set, no pagination.
pub async fn list_tasks(pool: &SqlitePool, project_id: i64) -> Result<Vec<TaskWithAssignee>> {
    let _project = crate::services::get_project(pool, project_id).await?;
    let tasks = db::tasks::list_by_project(pool, project_id).await?;

    let mut assignee_ids: Vec<i64> = tasks.iter().filter_map(|t| t.assignee_id).collect();
    assignee_ids.sort_unstable();
    assignee_ids.dedup();

    let users = db::users::get_many(pool, &assignee_ids).await?;

    Ok(tasks
        .into_iter()
        .map(|task| {
            let assignee = task
                .assignee_id
                .and_then(|id| users.iter().find(|u| u.id == id).cloned());
            TaskWithAssignee { task, assignee }
        })
        .collect())
}

/// Apply a partial update to a task.
///
/// A status change triggers a best-effort recomputation of the project's
/// progress; a billable task crossing into `done` fires the billing signal.
/// Neither side effect can fail the update itself.
pub async fn update_task(
    pool: &SqlitePool,
    billing: &BillingNotifier,
    id: i64,
    updates: UpdateTask,
) -> Result<Task> {
    if updates.is_empty() {
        return Err(SiteworkError::Validation {
            message: "update payload must contain at least one field".to_string(),
            fields: Vec::new(),
        });
    }

    let mut task = get_task(pool, id).await?;
    let old_status = task.status_enum();

    if let Some(title) = updates.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(SiteworkError::validation("title", "must not be empty"));
        }
        task.title = title;
    }
    if let Some(description) = updates.description {
        task.description = Some(description);
    }
    if let Some(status) = updates.status {
        task.status = status.as_str().to_string();
    }
    if let Some(priority) = updates.priority {
        task.priority = priority.as_str().to_string();
    }
    if let Some(assignee_id) = updates.assignee_id {
        task.assignee_id = Some(assignee_id);
    }
    if let Some(start) = updates.start_date {
        task.start_date = normalize_date("startDate", Some(start))?;
    }
    if let Some(due) = updates.due_date {
        task.due_date = normalize_date("dueDate", Some(due))?;
    }
    if let Some(percent) = updates.progress {
        task.progress = validate_percent("progress", percent)?;
    }
    if let Some(order) = updates.sort_order {
        task.sort_order = order;
    }
    if let Some(parent) = updates.parent_task_id {
        task.parent_task_id = Some(parent);
    }
    if let Some(billable) = updates.is_billable {
        task.is_billable = billable;
    }
    if let Some(published) = updates.published {
        task.published = published;
    }

    let updated = db::tasks::update(pool, &task).await?;
    if !updated {
        return Err(SiteworkError::TaskNotFound(id));
    }

    let new_status = task.status_enum();
    let status_changed = new_status != old_status;

    if status_changed {
        record_event(
            pool,
            CreateEvent {
                event_type: EventType::TaskStatusChanged,
                entity_type: EntityType::Task,
                entity_id: task.id,
                payload: serde_json::json!({
                    "old_status": old_status.as_str(),
                    "new_status": new_status.as_str(),
                }),
            },
        )
        .await;

        progress::recompute_best_effort(pool, task.project_id).await;

        // Fires only on the transition into done, so an idempotent
        // done -> done resubmission never re-signals.
        if task.is_billable && new_status == TaskStatus::Done {
            billing.notify(BillableCompletion {
                task_id: task.id,
                project_id: task.project_id,
                title: task.title.clone(),
            });
        }
    } else {
        record_event(
            pool,
            CreateEvent {
                event_type: EventType::TaskUpdated,
                entity_type: EntityType::Task,
                entity_id: task.id,
                payload: serde_json::json!({}),
            },
        )
        .await;
    }

    get_task(pool, id).await
}

/// Delete a task. Dependency edges referencing it, in either direction,
/// are removed with it.
pub async fn delete_task(pool: &SqlitePool, id: i64) -> Result<()> {
    let task = get_task(pool, id).await?;

    let deleted = db::tasks::delete(pool, id).await?;
    if !deleted {
        return Err(SiteworkError::TaskNotFound(id));
    }

    record_event(
        pool,
        CreateEvent {
            event_type: EventType::TaskDeleted,
            entity_type: EntityType::Task,
            entity_id: id,
            payload: serde_json::json!({
                "project_id": task.project_id,
            }),
        },
    )
    .await;

    Ok(())
}

/// Append an audit event, logging and swallowing failures. Audit history
/// must never fail the mutation it describes.
pub(crate) async fn record_event(pool: &SqlitePool, event: CreateEvent) {
    if let Err(e) = db::events::create(pool, &event).await {
        tracing::warn!(
            event_type = event.event_type.as_str(),
            entity_id = event.entity_id,
            error = %e,
            "failed to record audit event"
        );
    }
}

/// Normalize a client-supplied date string to `YYYY-MM-DD`.
/// Absent and blank values become None; RFC 3339 timestamps are accepted
/// and truncated to their date.
pub(crate) fn normalize_date(field: &str, value: Option<String>) -> Result<Option<String>> {
    let Some(raw) = value else { return Ok(None) };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date.format("%Y-%m-%d").to_string()));
    }
    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(datetime.date_naive().format("%Y-%m-%d").to_string()));
    }

    Err(SiteworkError::validation(
        field,
        "must be a date in YYYY-MM-DD form",
    ))
}

pub(crate) fn validate_percent(field: &str, value: i64) -> Result<i64> {
    if (0..=100).contains(&value) {
        Ok(value)
    } else {
        Err(SiteworkError::validation(field, "must be between 0 and 100"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_date_handles_blank_and_absent() {
        assert_eq!(normalize_date("startDate", None).unwrap(), None);
        assert_eq!(
            normalize_date("startDate", Some("   ".to_string())).unwrap(),
            None
        );
    }

    #[test]
    fn normalize_date_accepts_plain_and_rfc3339() {
        assert_eq!(
            normalize_date("dueDate", Some("2025-03-14".to_string())).unwrap(),
            Some("2025-03-14".to_string())
        );
        assert_eq!(
            normalize_date("dueDate", Some("2025-03-14T09:30:00Z".to_string())).unwrap(),
            Some("2025-03-14".to_string())
        );
    }

    #[test]
    fn normalize_date_rejects_garbage() {
        assert!(normalize_date("dueDate", Some("next tuesday".to_string())).is_err());
    }

    #[test]
    fn percent_bounds() {
        assert_eq!(validate_percent("progress", 0).unwrap(), 0);
        assert_eq!(validate_percent("progress", 100).unwrap(), 100);
        assert!(validate_percent("progress", -1).is_err());
        assert!(validate_percent("progress", 101).is_err());
    }
}
