pub mod connection;

use sqlx::SqlitePool;

use crate::error::Result;

/// Database operations for projects
pub mod projects {
    use sitework_types::Project;

    use super::*;

    pub async fn create(
        pool: &SqlitePool,
        name: &str,
        description: Option<&str>,
    ) -> Result<Project> {
        let now = chrono::Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"
            INSERT INTO projects (name, description, progress, created_at, updated_at)
            VALUES (?, ?, 0, ?, ?)
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;

        let project = get(pool, result.last_insert_rowid())
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(project)
    }

    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(project)
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY id ASC")
            .fetch_all(pool)
            .await?;
        Ok(projects)
    }

    pub async fn set_progress(pool: &SqlitePool, id: i64, progress: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE projects SET progress = ?, updated_at = ? WHERE id = ?")
            .bind(progress)
            .bind(chrono::Utc::now().to_rfc3339())
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Database operations for the user directory.
///
/// Users are provisioned outside this service; `insert` exists for
/// test fixtures and local seeding only.
pub mod users {
    use sitework_types::User;

    use super::*;

    pub async fn insert(pool: &SqlitePool, name: &str, email: Option<&str>) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(name)
            .bind(email)
            .execute(pool)
            .await?;

        let user = get(pool, result.last_insert_rowid())
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(user)
    }

    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn get_many(pool: &SqlitePool, ids: &[i64]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let json_ids = serde_json::to_string(ids)?;
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id IN (SELECT value FROM json_each(?))",
        )
        .bind(json_ids)
        .fetch_all(pool)
        .await?;
        Ok(users)
    }
}

/// Database operations for tasks
pub mod tasks {
    use sitework_types::Task;

    use super::*;

    /// Column values for a task insert; the id and timestamps are assigned
    /// by the store.
    #[derive(Debug, Clone, Default)]
    pub struct NewTask {
        pub project_id: i64,
        pub parent_task_id: Option<i64>,
        pub title: String,
        pub description: Option<String>,
        pub status: String,
        pub priority: String,
        pub assignee_id: Option<i64>,
        pub start_date: Option<String>,
        pub due_date: Option<String>,
        pub progress: i64,
        pub sort_order: i64,
        pub is_billable: bool,
    }

    pub async fn create(pool: &SqlitePool, new: &NewTask) -> Result<Task> {
        let now = chrono::Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (project_id, parent_task_id, title, description, status,
                priority, assignee_id, start_date, due_date, progress, sort_order,
                is_billable, published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
            "#,
        )
        .bind(new.project_id)
        .bind(new.parent_task_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.status)
        .bind(&new.priority)
        .bind(new.assignee_id)
        .bind(&new.start_date)
        .bind(&new.due_date)
        .bind(new.progress)
        .bind(new.sort_order)
        .bind(new.is_billable)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;

        let task = get(pool, result.last_insert_rowid())
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(task)
    }

    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(task)
    }

    pub async fn list_by_project(pool: &SqlitePool, project_id: i64) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE project_id = ? ORDER BY sort_order ASC, id ASC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;
        Ok(tasks)
    }

    /// Persist every mutable column of the task row. `project_id` is not in
    /// the SET list; a task never moves between projects.
    pub async fn update(pool: &SqlitePool, task: &Task) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?, description = ?, status = ?, priority = ?, assignee_id = ?,
                start_date = ?, due_date = ?, progress = ?, sort_order = ?,
                parent_task_id = ?, is_billable = ?, published = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.status)
        .bind(&task.priority)
        .bind(task.assignee_id)
        .bind(&task.start_date)
        .bind(&task.due_date)
        .bind(task.progress)
        .bind(task.sort_order)
        .bind(task.parent_task_id)
        .bind(task.is_billable)
        .bind(task.published)
        .bind(chrono::Utc::now().to_rfc3339())
        .bind(task.id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Dependency edges referencing the task go with it via FK cascade.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip the published flag on every task in the project.
    /// Returns the number of rows touched.
    pub async fn set_published(pool: &SqlitePool, project_id: i64, published: bool) -> Result<u64> {
        let result =
            sqlx::query("UPDATE tasks SET published = ?, updated_at = ? WHERE project_id = ?")
                .bind(published)
                .bind(chrono::Utc::now().to_rfc3339())
                .bind(project_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Count (total, completed) tasks for a project in one pass.
    /// Legacy rows with status `completed` count as done.
    pub async fn count_completion(pool: &SqlitePool, project_id: i64) -> Result<(i64, i64)> {
        let counts = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(CASE WHEN status IN ('done', 'completed') THEN 1 ELSE 0 END), 0)
            FROM tasks WHERE project_id = ?
            "#,
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(counts)
    }
}

/// Database operations for task dependencies
pub mod dependencies {
    use sitework_types::TaskDependency;

    use super::*;

    /// Insert the edge if it does not exist, then return the stored row.
    /// The unique (predecessor, successor) constraint makes this idempotent:
    /// a duplicate insert is a no-op and the original row comes back.
    pub async fn add(
        pool: &SqlitePool,
        predecessor_id: i64,
        successor_id: i64,
    ) -> Result<TaskDependency> {
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT INTO task_dependencies (predecessor_id, successor_id, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(predecessor_id, successor_id) DO NOTHING
            "#,
        )
        .bind(predecessor_id)
        .bind(successor_id)
        .bind(&now)
        .execute(pool)
        .await?;

        let edge = get_by_pair(pool, predecessor_id, successor_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(edge)
    }

    pub async fn get_by_pair(
        pool: &SqlitePool,
        predecessor_id: i64,
        successor_id: i64,
    ) -> Result<Option<TaskDependency>> {
        let edge = sqlx::query_as::<_, TaskDependency>(
            "SELECT * FROM task_dependencies WHERE predecessor_id = ? AND successor_id = ?",
        )
        .bind(predecessor_id)
        .bind(successor_id)
        .fetch_optional(pool)
        .await?;
        Ok(edge)
    }

    pub async fn remove(pool: &SqlitePool, predecessor_id: i64, successor_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM task_dependencies WHERE predecessor_id = ? AND successor_id = ?",
        )
        .bind(predecessor_id)
        .bind(successor_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Edges originating at the task (task as predecessor).
    pub async fn list_for_task(pool: &SqlitePool, task_id: i64) -> Result<Vec<TaskDependency>> {
        let edges = sqlx::query_as::<_, TaskDependency>(
            "SELECT * FROM task_dependencies WHERE predecessor_id = ? ORDER BY id ASC",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;
        Ok(edges)
    }

    /// All edges with at least one endpoint in the project, for rendering
    /// the full dependency graph.
    pub async fn list_for_project(pool: &SqlitePool, project_id: i64) -> Result<Vec<TaskDependency>> {
        let edges = sqlx::query_as::<_, TaskDependency>(
            r#"
            SELECT d.* FROM task_dependencies d
            JOIN tasks p ON p.id = d.predecessor_id
            JOIN tasks s ON s.id = d.successor_id
            WHERE p.project_id = ? OR s.project_id = ?
            ORDER BY d.id ASC
            "#,
        )
        .bind(project_id)
        .bind(project_id)
        .fetch_all(pool)
        .await?;
        Ok(edges)
    }

    /// Edges touching the task in either direction.
    pub async fn count_for_task(pool: &SqlitePool, task_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM task_dependencies WHERE predecessor_id = ? OR successor_id = ?",
        )
        .bind(task_id)
        .bind(task_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}

/// Database operations for events
pub mod events {
    use super::*;
    use crate::models::event::{CreateEvent, Event};

    pub async fn create(pool: &SqlitePool, event: &CreateEvent) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events (event_type, entity_type, entity_id, payload, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(event.event_type.as_str())
        .bind(event.entity_type.as_str())
        .bind(event.entity_id)
        .bind(event.payload.to_string())
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn list_by_entity(
        pool: &SqlitePool,
        entity_type: &str,
        entity_id: i64,
    ) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE entity_type = ? AND entity_id = ? ORDER BY id ASC",
        )
        .bind(entity_type)
        .bind(entity_id)
        .fetch_all(pool)
        .await?;
        Ok(events)
    }
}
