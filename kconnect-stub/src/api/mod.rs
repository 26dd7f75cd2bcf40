//! API Module
//!
//! HTTP layer of the stub worker.
//! Each submodule handles endpoints for one resource.

pub mod connectors;
pub mod error;
pub mod plugins;
pub mod tasks;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::worker::Worker;

/// Create the router with all worker endpoints
///
/// Listing and get endpoints answer with and without a trailing slash.
pub fn create_router(worker: Worker) -> Router {
    Router::new()
        // Connector endpoints
        .route(
            "/connectors",
            get(connectors::list_connectors).post(connectors::create_connector),
        )
        .route("/connectors/", get(connectors::list_connectors))
        .route(
            "/connectors/{name}",
            get(connectors::get_connector).delete(connectors::delete_connector),
        )
        .route("/connectors/{name}/", get(connectors::get_connector))
        .route(
            "/connectors/{name}/config",
            get(connectors::get_connector_config).put(connectors::put_connector_config),
        )
        .route(
            "/connectors/{name}/status",
            get(connectors::get_connector_status),
        )
        .route(
            "/connectors/{name}/restart",
            post(connectors::restart_connector),
        )
        .route("/connectors/{name}/pause", put(connectors::pause_connector))
        .route("/connectors/{name}/resume", put(connectors::resume_connector))
        // Task endpoints
        .route("/connectors/{name}/tasks", get(tasks::list_tasks))
        .route(
            "/connectors/{name}/tasks/{task_id}/status",
            get(tasks::get_task_status),
        )
        .route(
            "/connectors/{name}/tasks/{task_id}/restart",
            post(tasks::restart_task),
        )
        // Plugin endpoints
        .route("/connector-plugins", get(plugins::list_plugins))
        .route("/connector-plugins/", get(plugins::list_plugins))
        .route(
            "/connector-plugins/{plugin}/config/validate",
            put(plugins::validate_plugin_config),
        )
        // Add state and middleware
        .with_state(worker)
        .layer(TraceLayer::new_for_http())
}
