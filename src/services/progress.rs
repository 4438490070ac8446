//! Project progress aggregation.
//!
//! The project `progress` column is derived state: a full recount of the
//! project's tasks, performed on every status change. Recomputation is a
//! best-effort side effect of the triggering update; concurrent runs may
//! race, but the next recomputation converges on the current snapshot.

use sqlx::SqlitePool;

use crate::db;
use crate::error::Result;

/// Recompute and persist the project's completion percentage.
/// `round(100 * done / total)`; a project with no tasks is pinned to 0.
pub async fn recompute(pool: &SqlitePool, project_id: i64) -> Result<i64> {
    let (total, done) = db::tasks::count_completion(pool, project_id).await?;

    let percent = if total == 0 {
        0
    } else {
        ((100.0 * done as f64) / total as f64).round() as i64
    };

    db::projects::set_progress(pool, project_id, percent).await?;
    Ok(percent)
}

/// Recompute, logging and swallowing any failure. The task update that
/// triggered the recomputation has already succeeded and must be reported
/// as a success regardless.
pub async fn recompute_best_effort(pool: &SqlitePool, project_id: i64) {
    if let Err(e) = recompute(pool, project_id).await {
        tracing::warn!(project_id, error = %e, "progress recomputation failed");
    }
}
