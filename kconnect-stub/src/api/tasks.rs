//! Task API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use kconnect_core::{TaskInfo, TaskStatus};

use crate::api::error::ApiResult;
use crate::worker::Worker;

/// GET /connectors/{name}/tasks
/// List a connector's tasks
pub async fn list_tasks(
    State(worker): State<Worker>,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<TaskInfo>>> {
    tracing::debug!("Listing tasks of connector: {}", name);

    Ok(Json(worker.tasks(&name).await?))
}

/// GET /connectors/{name}/tasks/{task_id}/status
/// Get the status of one task
pub async fn get_task_status(
    State(worker): State<Worker>,
    Path((name, task_id)): Path<(String, u32)>,
) -> ApiResult<Json<TaskStatus>> {
    tracing::debug!("Getting status of task {}-{}", name, task_id);

    Ok(Json(worker.task_status(&name, task_id).await?))
}

/// POST /connectors/{name}/tasks/{task_id}/restart
/// Restart one task
pub async fn restart_task(
    State(worker): State<Worker>,
    Path((name, task_id)): Path<(String, u32)>,
) -> ApiResult<StatusCode> {
    tracing::info!("Restarting task {}-{}", name, task_id);

    worker.restart_task(&name, task_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
