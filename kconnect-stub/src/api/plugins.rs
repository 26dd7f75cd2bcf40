//! Plugin API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use kconnect_core::{ConfigValidation, ConnectorConfig, PluginInfo};

use crate::api::error::ApiResult;
use crate::worker::Worker;

/// GET /connector-plugins
/// List installed connector plugins
pub async fn list_plugins(State(worker): State<Worker>) -> Json<Vec<PluginInfo>> {
    tracing::debug!("Listing connector plugins");

    Json(worker.plugins())
}

/// PUT /connector-plugins/{plugin}/config/validate
/// Validate a configuration against a plugin
pub async fn validate_plugin_config(
    State(worker): State<Worker>,
    Path(plugin): Path<String>,
    Json(config): Json<ConnectorConfig>,
) -> ApiResult<Json<ConfigValidation>> {
    tracing::info!("Validating config for plugin: {}", plugin);

    Ok(Json(worker.validate(&plugin, &config)?))
}
