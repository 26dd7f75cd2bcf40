//! Connector API Handlers
//!
//! HTTP endpoints for connector management and lifecycle.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use kconnect_core::{ConnectorConfig, ConnectorInfo, ConnectorRequest, ConnectorStatus};

use crate::api::error::ApiResult;
use crate::worker::Worker;

// =============================================================================
// Connector Management
// =============================================================================

/// GET /connectors
/// List connector names
pub async fn list_connectors(State(worker): State<Worker>) -> Json<Vec<String>> {
    tracing::debug!("Listing all connectors");

    Json(worker.list().await)
}

/// POST /connectors
/// Create a connector
pub async fn create_connector(
    State(worker): State<Worker>,
    Json(req): Json<ConnectorRequest>,
) -> ApiResult<(StatusCode, Json<ConnectorInfo>)> {
    tracing::info!("Creating connector: {}", req.name);

    let info = worker.create(req).await?;

    Ok((StatusCode::CREATED, Json(info)))
}

/// GET /connectors/{name}
/// Get a connector
pub async fn get_connector(
    State(worker): State<Worker>,
    Path(name): Path<String>,
) -> ApiResult<Json<ConnectorInfo>> {
    tracing::debug!("Getting connector: {}", name);

    Ok(Json(worker.get(&name).await?))
}

/// GET /connectors/{name}/config
/// Get a connector's configuration
pub async fn get_connector_config(
    State(worker): State<Worker>,
    Path(name): Path<String>,
) -> ApiResult<Json<ConnectorConfig>> {
    tracing::debug!("Getting config of connector: {}", name);

    Ok(Json(worker.config(&name).await?))
}

/// PUT /connectors/{name}/config
/// Create or update a connector's configuration
pub async fn put_connector_config(
    State(worker): State<Worker>,
    Path(name): Path<String>,
    Json(config): Json<ConnectorConfig>,
) -> ApiResult<(StatusCode, Json<ConnectorInfo>)> {
    tracing::info!("Putting config of connector: {}", name);

    let (created, info) = worker.put_config(&name, config).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(info)))
}

/// GET /connectors/{name}/status
/// Get the status of a connector and its tasks
pub async fn get_connector_status(
    State(worker): State<Worker>,
    Path(name): Path<String>,
) -> ApiResult<Json<ConnectorStatus>> {
    tracing::debug!("Getting status of connector: {}", name);

    Ok(Json(worker.status(&name).await?))
}

/// DELETE /connectors/{name}
/// Delete a connector
pub async fn delete_connector(
    State(worker): State<Worker>,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    tracing::info!("Deleting connector: {}", name);

    worker.delete(&name).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Connector Lifecycle
// =============================================================================

/// POST /connectors/{name}/restart
/// Restart a connector
pub async fn restart_connector(
    State(worker): State<Worker>,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    tracing::info!("Restarting connector: {}", name);

    worker.restart(&name).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /connectors/{name}/pause
/// Pause a connector and its tasks
pub async fn pause_connector(
    State(worker): State<Worker>,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    tracing::info!("Pausing connector: {}", name);

    worker.pause(&name).await?;

    Ok(StatusCode::ACCEPTED)
}

/// PUT /connectors/{name}/resume
/// Resume a paused connector
pub async fn resume_connector(
    State(worker): State<Worker>,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    tracing::info!("Resuming connector: {}", name);

    worker.resume(&name).await?;

    Ok(StatusCode::ACCEPTED)
}
