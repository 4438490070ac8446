//! Integration tests for the task store: creation, listing with resolved
//! assignees, partial updates, and cascade behavior on delete.

use sitework::db::{self, connection};
use sitework::error::SiteworkError;
use sitework::services::billing::BillingNotifier;
use sitework::services;
use sitework_types::{CreateTask, Project, TaskStatus, UpdateTask};
use sqlx::SqlitePool;

async fn setup() -> SqlitePool {
    let pool = connection::create_memory_pool().await.unwrap();
    connection::run_migrations(&pool).await.unwrap();
    pool
}

async fn make_project(pool: &SqlitePool, name: &str) -> Project {
    services::create_project(
        pool,
        sitework_types::CreateProject {
            name: name.to_string(),
            description: None,
        },
    )
    .await
    .unwrap()
}

fn titled(title: &str) -> CreateTask {
    CreateTask {
        title: title.to_string(),
        ..CreateTask::default()
    }
}

#[tokio::test]
async fn create_task_defaults() {
    let pool = setup().await;
    let project = make_project(&pool, "Riverside Duplex").await;

    let task = services::create_task(&pool, project.id, titled("Frame first floor"))
        .await
        .unwrap();

    assert_eq!(task.project_id, project.id);
    assert_eq!(task.status, "todo");
    assert_eq!(task.priority, "medium");
    assert_eq!(task.progress, 0);
    assert!(!task.published);
    assert!(!task.is_billable);
}

#[tokio::test]
async fn create_task_requires_title() {
    let pool = setup().await;
    let project = make_project(&pool, "Riverside Duplex").await;

    let err = services::create_task(&pool, project.id, titled("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, SiteworkError::Validation { .. }));
}

#[tokio::test]
async fn create_task_requires_project() {
    let pool = setup().await;

    let err = services::create_task(&pool, 999, titled("Orphan task"))
        .await
        .unwrap_err();
    assert!(matches!(err, SiteworkError::ProjectNotFound(999)));
}

#[tokio::test]
async fn create_task_normalizes_dates() {
    let pool = setup().await;
    let project = make_project(&pool, "Riverside Duplex").await;

    let input = CreateTask {
        title: "Pour foundation".to_string(),
        start_date: Some("2025-04-01T08:00:00Z".to_string()),
        due_date: Some("".to_string()),
        ..CreateTask::default()
    };
    let task = services::create_task(&pool, project.id, input).await.unwrap();

    assert_eq!(task.start_date.as_deref(), Some("2025-04-01"));
    assert_eq!(task.due_date, None);
}

#[tokio::test]
async fn list_tasks_resolves_assignees() {
    let pool = setup().await;
    let project = make_project(&pool, "Riverside Duplex").await;
    let user = db::users::insert(&pool, "Dana Ferris", Some("dana@example.com"))
        .await
        .unwrap();

    let assigned = CreateTask {
        title: "Install windows".to_string(),
        assignee_id: Some(user.id),
        ..CreateTask::default()
    };
    services::create_task(&pool, project.id, assigned).await.unwrap();
    services::create_task(&pool, project.id, titled("Unassigned punch item"))
        .await
        .unwrap();

    let listed = services::list_tasks(&pool, project.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(
        listed[0].assignee.as_ref().map(|u| u.name.as_str()),
        Some("Dana Ferris")
    );
    assert!(listed[1].assignee.is_none());
}

#[tokio::test]
async fn update_rejects_empty_patch() {
    let pool = setup().await;
    let project = make_project(&pool, "Riverside Duplex").await;
    let (billing, _rx) = BillingNotifier::channel();
    let task = services::create_task(&pool, project.id, titled("Hang drywall"))
        .await
        .unwrap();

    let err = services::update_task(&pool, &billing, task.id, UpdateTask::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SiteworkError::Validation { .. }));
}

#[tokio::test]
async fn update_cannot_move_task_between_projects() {
    let pool = setup().await;
    let first = make_project(&pool, "Riverside Duplex").await;
    let _second = make_project(&pool, "Hilltop Remodel").await;
    let (billing, _rx) = BillingNotifier::channel();
    let task = services::create_task(&pool, first.id, titled("Rough plumbing"))
        .await
        .unwrap();

    // projectId is not part of the patch shape; an attempt to smuggle it in
    // deserializes to a patch without it.
    let patch: UpdateTask =
        serde_json::from_str(r#"{"projectId": 2, "title": "Rough plumbing rev A"}"#).unwrap();
    let updated = services::update_task(&pool, &billing, task.id, patch).await.unwrap();

    assert_eq!(updated.project_id, first.id);
    assert_eq!(updated.title, "Rough plumbing rev A");
}

#[tokio::test]
async fn update_unknown_task_not_found() {
    let pool = setup().await;
    let _project = make_project(&pool, "Riverside Duplex").await;
    let (billing, _rx) = BillingNotifier::channel();

    let patch = UpdateTask {
        status: Some(TaskStatus::Done),
        ..UpdateTask::default()
    };
    let err = services::update_task(&pool, &billing, 42, patch).await.unwrap_err();
    assert!(matches!(err, SiteworkError::TaskNotFound(42)));
}

#[tokio::test]
async fn delete_task_cascades_dependency_edges() {
    let pool = setup().await;
    let project = make_project(&pool, "Riverside Duplex").await;

    let a = services::create_task(&pool, project.id, titled("Set forms"))
        .await
        .unwrap();
    let b = services::create_task(&pool, project.id, titled("Pour slab"))
        .await
        .unwrap();
    let c = services::create_task(&pool, project.id, titled("Cure and strip"))
        .await
        .unwrap();

    services::add_dependency(&pool, a.id, b.id).await.unwrap();
    services::add_dependency(&pool, b.id, c.id).await.unwrap();

    // b participates in both edges; deleting it must leave none behind.
    services::delete_task(&pool, b.id).await.unwrap();

    assert_eq!(db::dependencies::count_for_task(&pool, b.id).await.unwrap(), 0);
    let remaining = db::dependencies::list_for_project(&pool, project.id)
        .await
        .unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn delete_unknown_task_not_found() {
    let pool = setup().await;
    let _project = make_project(&pool, "Riverside Duplex").await;

    let err = services::delete_task(&pool, 7).await.unwrap_err();
    assert!(matches!(err, SiteworkError::TaskNotFound(7)));
}

#[tokio::test]
async fn status_change_is_recorded_in_audit_log() {
    let pool = setup().await;
    let project = make_project(&pool, "Riverside Duplex").await;
    let (billing, _rx) = BillingNotifier::channel();
    let task = services::create_task(&pool, project.id, titled("Grade driveway"))
        .await
        .unwrap();

    let patch = UpdateTask {
        status: Some(TaskStatus::InProgress),
        ..UpdateTask::default()
    };
    services::update_task(&pool, &billing, task.id, patch).await.unwrap();

    let events = db::events::list_by_entity(&pool, "task", task.id).await.unwrap();
    let types: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(types, ["task.created", "task.status_changed"]);
}

#[tokio::test]
async fn file_backed_pool_round_trip() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("sitework.db");

    let pool = connection::create_pool(&db_path).await.unwrap();
    connection::run_migrations(&pool).await.unwrap();

    let project = make_project(&pool, "Warehouse Fit-out").await;
    let task = services::create_task(&pool, project.id, titled("Demo interior walls"))
        .await
        .unwrap();

    let fetched = services::get_task(&pool, task.id).await.unwrap();
    assert_eq!(fetched.title, "Demo interior walls");
}
