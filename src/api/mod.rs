//! HTTP surface: router construction and shared state.

pub mod error;
pub mod projects;
pub mod tasks;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::billing::BillingNotifier;

/// Shared application state.
pub struct AppState {
    pub pool: SqlitePool,
    pub billing: BillingNotifier,
}

/// Build the API router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/projects",
            post(projects::create_project).get(projects::list_projects),
        )
        .route("/api/projects/{projectId}", get(projects::get_project))
        .route(
            "/api/projects/{projectId}/tasks",
            post(tasks::create_task).get(tasks::list_tasks),
        )
        // The dependency collection routes sit above the task-id routes so
        // the literal segment is not captured as a task id.
        .route(
            "/api/projects/{projectId}/tasks/dependencies",
            get(tasks::list_dependencies)
                .post(tasks::add_dependency)
                .delete(tasks::remove_dependency),
        )
        .route(
            "/api/projects/{projectId}/tasks/publish",
            post(tasks::publish_all),
        )
        .route(
            "/api/projects/{projectId}/tasks/unpublish",
            post(tasks::unpublish_all),
        )
        .route(
            "/api/projects/{projectId}/tasks/import",
            post(tasks::import_plan),
        )
        .route(
            "/api/projects/{projectId}/tasks/{taskId}",
            put(tasks::update_task).delete(tasks::delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn serve(addr: &str, state: Arc<AppState>) -> crate::error::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "sitework API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
