use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Event types for the audit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ProjectCreated,
    TaskCreated,
    TaskUpdated,
    TaskStatusChanged,
    TaskDeleted,
    DependencyAdded,
    DependencyRemoved,
    TasksPublished,
    TasksUnpublished,
    TasksImported,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::ProjectCreated => "project.created",
            EventType::TaskCreated => "task.created",
            EventType::TaskUpdated => "task.updated",
            EventType::TaskStatusChanged => "task.status_changed",
            EventType::TaskDeleted => "task.deleted",
            EventType::DependencyAdded => "dependency.added",
            EventType::DependencyRemoved => "dependency.removed",
            EventType::TasksPublished => "tasks.published",
            EventType::TasksUnpublished => "tasks.unpublished",
            EventType::TasksImported => "tasks.imported",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Project,
    Task,
    Dependency,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Project => "project",
            EntityType::Task => "task",
            EntityType::Dependency => "dependency",
        }
    }
}

/// A stored audit event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: i64,
    pub payload: String,
    pub created_at: String,
}

/// Input for appending an audit event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub event_type: EventType,
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub payload: serde_json::Value,
}
