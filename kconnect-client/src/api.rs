//! Trait over the connector management API
//!
//! Code that drives connectors can depend on `dyn ConnectApi` instead of the
//! concrete HTTP client and substitute a fake in tests.

use async_trait::async_trait;
use kconnect_core::{
    ConfigValidation, ConnectorConfig, ConnectorInfo, ConnectorRequest, ConnectorStatus,
    PluginInfo, TaskInfo, TaskStatus,
};

use crate::ConnectClient;
use crate::error::Result;
use crate::response::ApiResponse;

/// Operations offered by a Connect worker's REST API
#[async_trait]
pub trait ConnectApi: Send + Sync {
    // Connectors
    async fn list_connectors(&self) -> Result<ApiResponse<Vec<String>>>;
    async fn create_connector(&self, req: &ConnectorRequest) -> Result<ApiResponse<ConnectorInfo>>;
    async fn get_connector(&self, name: &str) -> Result<ApiResponse<ConnectorInfo>>;
    async fn get_connector_config(&self, name: &str) -> Result<ApiResponse<ConnectorConfig>>;
    async fn update_connector_config(
        &self,
        name: &str,
        config: &ConnectorConfig,
    ) -> Result<ApiResponse<ConnectorInfo>>;
    async fn get_connector_status(&self, name: &str) -> Result<ApiResponse<ConnectorStatus>>;
    async fn restart_connector(&self, name: &str) -> Result<ApiResponse<()>>;
    async fn pause_connector(&self, name: &str) -> Result<ApiResponse<()>>;
    async fn resume_connector(&self, name: &str) -> Result<ApiResponse<()>>;
    async fn delete_connector(&self, name: &str) -> Result<ApiResponse<()>>;

    // Tasks
    async fn list_tasks(&self, name: &str) -> Result<ApiResponse<Vec<TaskInfo>>>;
    async fn get_task_status(&self, name: &str, task_id: u32) -> Result<ApiResponse<TaskStatus>>;
    async fn restart_task(&self, name: &str, task_id: u32) -> Result<ApiResponse<()>>;

    // Plugins
    async fn list_plugins(&self) -> Result<ApiResponse<Vec<PluginInfo>>>;
    async fn validate_plugin_config(
        &self,
        plugin: &str,
        config: &ConnectorConfig,
    ) -> Result<ApiResponse<ConfigValidation>>;
}

#[async_trait]
impl ConnectApi for ConnectClient {
    async fn list_connectors(&self) -> Result<ApiResponse<Vec<String>>> {
        ConnectClient::list_connectors(self).await
    }

    async fn create_connector(&self, req: &ConnectorRequest) -> Result<ApiResponse<ConnectorInfo>> {
        ConnectClient::create_connector(self, req).await
    }

    async fn get_connector(&self, name: &str) -> Result<ApiResponse<ConnectorInfo>> {
        ConnectClient::get_connector(self, name).await
    }

    async fn get_connector_config(&self, name: &str) -> Result<ApiResponse<ConnectorConfig>> {
        ConnectClient::get_connector_config(self, name).await
    }

    async fn update_connector_config(
        &self,
        name: &str,
        config: &ConnectorConfig,
    ) -> Result<ApiResponse<ConnectorInfo>> {
        ConnectClient::update_connector_config(self, name, config).await
    }

    async fn get_connector_status(&self, name: &str) -> Result<ApiResponse<ConnectorStatus>> {
        ConnectClient::get_connector_status(self, name).await
    }

    async fn restart_connector(&self, name: &str) -> Result<ApiResponse<()>> {
        ConnectClient::restart_connector(self, name).await
    }

    async fn pause_connector(&self, name: &str) -> Result<ApiResponse<()>> {
        ConnectClient::pause_connector(self, name).await
    }

    async fn resume_connector(&self, name: &str) -> Result<ApiResponse<()>> {
        ConnectClient::resume_connector(self, name).await
    }

    async fn delete_connector(&self, name: &str) -> Result<ApiResponse<()>> {
        ConnectClient::delete_connector(self, name).await
    }

    async fn list_tasks(&self, name: &str) -> Result<ApiResponse<Vec<TaskInfo>>> {
        ConnectClient::list_tasks(self, name).await
    }

    async fn get_task_status(&self, name: &str, task_id: u32) -> Result<ApiResponse<TaskStatus>> {
        ConnectClient::get_task_status(self, name, task_id).await
    }

    async fn restart_task(&self, name: &str, task_id: u32) -> Result<ApiResponse<()>> {
        ConnectClient::restart_task(self, name, task_id).await
    }

    async fn list_plugins(&self) -> Result<ApiResponse<Vec<PluginInfo>>> {
        ConnectClient::list_plugins(self).await
    }

    async fn validate_plugin_config(
        &self,
        plugin: &str,
        config: &ConnectorConfig,
    ) -> Result<ApiResponse<ConfigValidation>> {
        ConnectClient::validate_plugin_config(self, plugin, config).await
    }
}
