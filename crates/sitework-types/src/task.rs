use serde::{Deserialize, Serialize};

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use crate::user::User;

/// Task as stored and returned by the sitework API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    #[serde(default)]
    pub parent_task_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub assignee_id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub is_billable: bool,
    #[serde(default)]
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Task {
    pub fn status_enum(&self) -> TaskStatus {
        self.status.parse().unwrap_or_default()
    }

    pub fn priority_enum(&self) -> TaskPriority {
        self.priority.parse().unwrap_or_default()
    }

    /// Whether the stored status counts toward project completion.
    /// Accepts the legacy `completed` value alongside `done`.
    pub fn is_complete(&self) -> bool {
        self.status_enum() == TaskStatus::Done
    }
}

/// Task status enum with snake_case serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Blocked,
    Done,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Done => "done",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    /// Status inferred from a 0-100 completion percentage, used by plan
    /// import.
    pub fn from_percent(percent: i64) -> Self {
        if percent >= 100 {
            TaskStatus::Done
        } else if percent > 0 {
            TaskStatus::InProgress
        } else {
            TaskStatus::Todo
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" | "in-progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "blocked" => Ok(TaskStatus::Blocked),
            // Legacy rows use `completed`.
            "done" | "completed" => Ok(TaskStatus::Done),
            "cancelled" | "canceled" => Ok(TaskStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(()),
        }
    }
}

/// A directed precedence edge between two tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TaskDependency {
    pub id: i64,
    pub predecessor_id: i64,
    pub successor_id: i64,
    pub created_at: String,
}

/// A task joined with its resolved assignee, as returned by task listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithAssignee {
    #[serde(flatten)]
    pub task: Task,
    #[serde(default)]
    pub assignee: Option<User>,
}

/// Payload for creating a task.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub assignee_id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub parent_task_id: Option<i64>,
    #[serde(default)]
    pub is_billable: Option<bool>,
}

/// Partial-update payload for a task. `project_id` is deliberately absent:
/// a task never moves between projects, and unknown JSON fields are
/// ignored on deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub assignee_id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub parent_task_id: Option<i64>,
    #[serde(default)]
    pub is_billable: Option<bool>,
    #[serde(default)]
    pub published: Option<bool>,
}

impl UpdateTask {
    /// True when the patch carries no recognized field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee_id.is_none()
            && self.start_date.is_none()
            && self.due_date.is_none()
            && self.progress.is_none()
            && self.sort_order.is_none()
            && self.parent_task_id.is_none()
            && self.is_billable.is_none()
            && self.published.is_none()
    }
}

/// Payload for creating a dependency edge.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRef {
    pub predecessor_id: i64,
    pub successor_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_as_str_round_trips() {
        for status in [
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Blocked,
            TaskStatus::Done,
            TaskStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_accepts_legacy_completed() {
        assert_eq!("completed".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert_eq!("Completed".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
    }

    #[test]
    fn status_rejects_unknown() {
        assert!("archived".parse::<TaskStatus>().is_err());
        assert!("".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn status_from_percent() {
        assert_eq!(TaskStatus::from_percent(100), TaskStatus::Done);
        assert_eq!(TaskStatus::from_percent(55), TaskStatus::InProgress);
        assert_eq!(TaskStatus::from_percent(1), TaskStatus::InProgress);
        assert_eq!(TaskStatus::from_percent(0), TaskStatus::Todo);
    }

    #[test]
    fn is_complete_honors_legacy_status() {
        let raw = r#"{
            "id": 1, "projectId": 1, "title": "t", "status": "completed",
            "priority": "medium", "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert!(task.is_complete());
    }

    #[test]
    fn priority_parse() {
        assert_eq!("high".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert_eq!("LOW".parse::<TaskPriority>().unwrap(), TaskPriority::Low);
        assert!("urgent".parse::<TaskPriority>().is_err());
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn update_task_ignores_unknown_fields() {
        let patch: UpdateTask =
            serde_json::from_str(r#"{"projectId": 99, "title": "reframe wall"}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some("reframe wall"));
        assert!(!patch.is_empty());
    }

    #[test]
    fn update_task_empty_detection() {
        let patch: UpdateTask = serde_json::from_str(r#"{"projectId": 99}"#).unwrap();
        assert!(patch.is_empty());
    }
}
