//! Connector-related API endpoints

use kconnect_core::{ConnectorConfig, ConnectorInfo, ConnectorRequest, ConnectorStatus};

use crate::ConnectClient;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

impl ConnectClient {
    // =============================================================================
    // Connector Management
    // =============================================================================

    /// List the names of all active connectors
    ///
    /// `GET /connectors/`
    pub async fn list_connectors(&self) -> Result<ApiResponse<Vec<String>>> {
        let url = self.endpoint(&["connectors", ""])?;
        self.execute(ApiRequest::get("list connectors", url)).await
    }

    /// Create a connector
    ///
    /// `POST /connectors`. The worker answers 201 on success and 409 if a
    /// connector with the same name exists or a rebalance is in progress.
    ///
    /// # Arguments
    /// * `req` - Name and configuration of the new connector
    ///
    /// # Returns
    /// The created connector, including its assigned tasks
    ///
    /// # Example
    /// ```no_run
    /// # use kconnect_client::ConnectClient;
    /// # use kconnect_core::{ConnectorConfig, ConnectorRequest};
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ConnectClient::new("localhost:8083")?;
    /// let mut config = ConnectorConfig::new();
    /// config.insert("connector.class".to_string(), "FileStreamSourceConnector".into());
    /// config.insert("tasks.max".to_string(), "1".into());
    ///
    /// let created = client
    ///     .create_connector(&ConnectorRequest::new("local-file-source", config))
    ///     .await?;
    /// assert_eq!(created.status, 201);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_connector(
        &self,
        req: &ConnectorRequest,
    ) -> Result<ApiResponse<ConnectorInfo>> {
        let url = self.endpoint(&["connectors"])?;
        self.execute(ApiRequest::post("create connector", url).json(req)?)
            .await
    }

    /// Get information about a connector
    ///
    /// `GET /connectors/{name}/`
    ///
    /// # Arguments
    /// * `name` - The connector name
    pub async fn get_connector(&self, name: &str) -> Result<ApiResponse<ConnectorInfo>> {
        let url = self.endpoint(&["connectors", name, ""])?;
        self.execute(ApiRequest::get("get connector", url)).await
    }

    /// Get the configuration of a connector
    ///
    /// `GET /connectors/{name}/config`
    pub async fn get_connector_config(&self, name: &str) -> Result<ApiResponse<ConnectorConfig>> {
        let url = self.endpoint(&["connectors", name, "config"])?;
        self.execute(ApiRequest::get("get connector config", url))
            .await
    }

    /// Create a connector with the given configuration, or update the
    /// configuration of an existing one
    ///
    /// `PUT /connectors/{name}/config`. Answers 201 when the connector was
    /// created, 200 when it was updated and 409 during a rebalance.
    ///
    /// # Arguments
    /// * `name` - The connector name
    /// * `config` - The complete new configuration; it replaces the old one
    ///
    /// # Returns
    /// The connector after the update. Use `status` to tell creation from update.
    pub async fn update_connector_config(
        &self,
        name: &str,
        config: &ConnectorConfig,
    ) -> Result<ApiResponse<ConnectorInfo>> {
        let url = self.endpoint(&["connectors", name, "config"])?;
        self.execute(ApiRequest::put("update connector config", url).json(config)?)
            .await
    }

    /// Get the current status of a connector and its tasks: whether each is
    /// running, failed or paused, which worker it is assigned to, and the
    /// failure trace if it has failed
    ///
    /// `GET /connectors/{name}/status`
    ///
    /// # Arguments
    /// * `name` - The connector name
    pub async fn get_connector_status(&self, name: &str) -> Result<ApiResponse<ConnectorStatus>> {
        let url = self.endpoint(&["connectors", name, "status"])?;
        self.execute(ApiRequest::get("get connector status", url))
            .await
    }

    /// Delete a connector, halting all tasks and deleting its configuration
    ///
    /// `DELETE /connectors/{name}`. Answers 409 during a rebalance.
    pub async fn delete_connector(&self, name: &str) -> Result<ApiResponse<()>> {
        let url = self.endpoint(&["connectors", name])?;
        self.execute_empty(ApiRequest::delete("delete connector", url))
            .await
    }

    // =============================================================================
    // Connector Lifecycle
    // =============================================================================

    /// Restart a connector
    ///
    /// `POST /connectors/{name}/restart`. Answers 409 during a rebalance.
    pub async fn restart_connector(&self, name: &str) -> Result<ApiResponse<()>> {
        let url = self.endpoint(&["connectors", name, "restart"])?;
        self.execute_empty(ApiRequest::post("restart connector", url))
            .await
    }

    /// Pause a connector and its tasks, which stops message processing until
    /// the connector is resumed
    ///
    /// `PUT /connectors/{name}/pause`. The call is asynchronous: tasks do not
    /// all reach `PAUSED` by the time it returns.
    pub async fn pause_connector(&self, name: &str) -> Result<ApiResponse<()>> {
        let url = self.endpoint(&["connectors", name, "pause"])?;
        self.execute_empty(ApiRequest::put("pause connector", url))
            .await
    }

    /// Resume a paused connector, or do nothing if it is not paused
    ///
    /// `PUT /connectors/{name}/resume`. Asynchronous like `pause_connector`.
    pub async fn resume_connector(&self, name: &str) -> Result<ApiResponse<()>> {
        let url = self.endpoint(&["connectors", name, "resume"])?;
        self.execute_empty(ApiRequest::put("resume connector", url))
            .await
    }
}
