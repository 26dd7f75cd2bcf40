//! Connector plugin API endpoints

use kconnect_core::{ConfigValidation, ConnectorConfig, PluginInfo};

use crate::ConnectClient;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

impl ConnectClient {
    // =============================================================================
    // Plugins
    // =============================================================================

    /// List the connector plugins installed in the cluster
    ///
    /// `GET /connector-plugins/`. Only the worker that handles the request is
    /// inspected, so results can differ between workers, e.g. during a rolling
    /// upgrade that adds new connector jars.
    pub async fn list_plugins(&self) -> Result<ApiResponse<Vec<PluginInfo>>> {
        let url = self.endpoint(&["connector-plugins", ""])?;
        self.execute(ApiRequest::get("list connector plugins", url))
            .await
    }

    /// Validate configuration values against a plugin's configuration definition
    ///
    /// `PUT /connector-plugins/{name}/config/validate`. Validation runs per
    /// field; the result carries error messages and recommended values.
    ///
    /// # Arguments
    /// * `plugin` - Full class name or simple name of the connector plugin
    /// * `config` - The configuration to check; sent as-is
    ///
    /// # Returns
    /// The per-field validation result. A 200 does not mean the config is
    /// valid: check `error_count` or `ConfigValidation::is_valid`.
    ///
    /// # Example
    /// ```no_run
    /// # use kconnect_client::ConnectClient;
    /// # use kconnect_core::ConnectorConfig;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ConnectClient::new("localhost:8083")?;
    /// let mut config = ConnectorConfig::new();
    /// config.insert("connector.class".to_string(), "FileStreamSinkConnector".into());
    ///
    /// let validation = client
    ///     .validate_plugin_config("FileStreamSinkConnector", &config)
    ///     .await?;
    /// for (field, errors) in validation.field_errors() {
    ///     println!("{field}: {}", errors.join(", "));
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn validate_plugin_config(
        &self,
        plugin: &str,
        config: &ConnectorConfig,
    ) -> Result<ApiResponse<ConfigValidation>> {
        let url = self.endpoint(&["connector-plugins", plugin, "config", "validate"])?;
        self.execute(ApiRequest::put("validate plugin config", url).json(config)?)
            .await
    }
}
