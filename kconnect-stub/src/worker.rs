//! In-memory Connect worker
//!
//! Keeps connectors in a shared map and answers every management operation
//! the way a single-node Connect worker would. There is no real task
//! execution: tasks exist as entries derived from `tasks.max`.

use std::collections::HashMap;
use std::sync::Arc;

use kconnect_core::{
    ConfigDefinition, ConfigInfo, ConfigValidation, ConfigValue, ConnectorConfig, ConnectorInfo,
    ConnectorRequest, ConnectorStatus, ConnectorType, PluginInfo, State, TaskId, TaskInfo,
    TaskStatus, WorkerStatus,
};
use tokio::sync::RwLock;

/// Worker error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    NotFound(String),
    Conflict(String),
    BadRequest(String),
}

pub type Result<T> = std::result::Result<T, WorkerError>;

const CONNECTOR_CLASS: &str = "connector.class";
const TASKS_MAX: &str = "tasks.max";
/// Upper bound on `tasks.max` the worker accepts
pub const MAX_TASKS: u32 = 1024;

#[derive(Debug, Clone)]
struct StoredConnector {
    config: ConnectorConfig,
    paused: bool,
    restarts: u32,
}

impl StoredConnector {
    fn new(config: ConnectorConfig) -> Self {
        Self {
            config,
            paused: false,
            restarts: 0,
        }
    }

    fn task_count(&self) -> u32 {
        self.config
            .get(TASKS_MAX)
            .and_then(|v| config_string(v).parse::<u32>().ok())
            .filter(|n| (1..=MAX_TASKS).contains(n))
            .unwrap_or(1)
    }

    fn state(&self) -> State {
        if self.paused {
            State::Paused
        } else {
            State::Running
        }
    }

    fn connector_type(&self) -> Option<ConnectorType> {
        let class = self.config.get(CONNECTOR_CLASS).map(config_string)?;
        if class.ends_with("SinkConnector") {
            Some(ConnectorType::Sink)
        } else if class.ends_with("SourceConnector") {
            Some(ConnectorType::Source)
        } else {
            None
        }
    }
}

/// Shared handle to the worker state
#[derive(Debug, Clone)]
pub struct Worker {
    worker_id: String,
    connectors: Arc<RwLock<HashMap<String, StoredConnector>>>,
    plugins: Arc<Vec<PluginInfo>>,
}

impl Worker {
    /// Create an empty worker that reports itself as `worker_id`
    pub fn new(worker_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            connectors: Arc::new(RwLock::new(HashMap::new())),
            plugins: Arc::new(default_plugins()),
        }
    }

    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    // =============================================================================
    // Connectors
    // =============================================================================

    /// Names of all connectors, sorted
    pub async fn list(&self) -> Vec<String> {
        let connectors = self.connectors.read().await;
        let mut names: Vec<String> = connectors.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn create(&self, req: ConnectorRequest) -> Result<ConnectorInfo> {
        if req.name.trim().is_empty() {
            return Err(WorkerError::BadRequest(
                "Connector name must not be empty".to_string(),
            ));
        }

        check_tasks_max(&req.config)?;

        let mut connectors = self.connectors.write().await;
        if connectors.contains_key(&req.name) {
            return Err(WorkerError::Conflict(format!(
                "Connector {} already exists",
                req.name
            )));
        }

        let stored = StoredConnector::new(req.config);
        let info = connector_info(&req.name, &stored);
        connectors.insert(req.name.clone(), stored);

        tracing::info!("Connector created: {}", req.name);

        Ok(info)
    }

    pub async fn get(&self, name: &str) -> Result<ConnectorInfo> {
        let connectors = self.connectors.read().await;
        let stored = connectors.get(name).ok_or_else(|| not_found(name))?;
        Ok(connector_info(name, stored))
    }

    pub async fn config(&self, name: &str) -> Result<ConnectorConfig> {
        let connectors = self.connectors.read().await;
        let stored = connectors.get(name).ok_or_else(|| not_found(name))?;
        Ok(stored.config.clone())
    }

    /// Create or replace a connector's configuration
    ///
    /// Returns whether the connector was created by this call.
    pub async fn put_config(
        &self,
        name: &str,
        config: ConnectorConfig,
    ) -> Result<(bool, ConnectorInfo)> {
        check_tasks_max(&config)?;

        let mut connectors = self.connectors.write().await;
        let created = match connectors.get_mut(name) {
            Some(stored) => {
                stored.config = config;
                false
            }
            None => {
                connectors.insert(name.to_string(), StoredConnector::new(config));
                true
            }
        };

        let info = connector_info(name, &connectors[name]);
        tracing::info!("Connector {} config {}", name, if created { "created" } else { "updated" });

        Ok((created, info))
    }

    pub async fn status(&self, name: &str) -> Result<ConnectorStatus> {
        let connectors = self.connectors.read().await;
        let stored = connectors.get(name).ok_or_else(|| not_found(name))?;

        Ok(ConnectorStatus {
            name: name.to_string(),
            connector: WorkerStatus {
                state: stored.state(),
                worker_id: self.worker_id.clone(),
                trace: None,
            },
            tasks: (0..stored.task_count())
                .map(|id| self.task_status_of(stored, id))
                .collect(),
            connector_type: stored.connector_type(),
        })
    }

    pub async fn restart(&self, name: &str) -> Result<()> {
        let mut connectors = self.connectors.write().await;
        let stored = connectors.get_mut(name).ok_or_else(|| not_found(name))?;
        stored.restarts += 1;
        tracing::info!("Connector {} restarted ({} restarts)", name, stored.restarts);
        Ok(())
    }

    pub async fn pause(&self, name: &str) -> Result<()> {
        self.set_paused(name, true).await
    }

    pub async fn resume(&self, name: &str) -> Result<()> {
        self.set_paused(name, false).await
    }

    async fn set_paused(&self, name: &str, paused: bool) -> Result<()> {
        let mut connectors = self.connectors.write().await;
        let stored = connectors.get_mut(name).ok_or_else(|| not_found(name))?;
        stored.paused = paused;
        tracing::info!("Connector {} is now {}", name, stored.state());
        Ok(())
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        let mut connectors = self.connectors.write().await;
        connectors.remove(name).ok_or_else(|| not_found(name))?;
        tracing::info!("Connector deleted: {}", name);
        Ok(())
    }

    /// Number of restarts requested for a connector
    pub async fn restarts(&self, name: &str) -> Result<u32> {
        let connectors = self.connectors.read().await;
        let stored = connectors.get(name).ok_or_else(|| not_found(name))?;
        Ok(stored.restarts)
    }

    // =============================================================================
    // Tasks
    // =============================================================================

    pub async fn tasks(&self, name: &str) -> Result<Vec<TaskInfo>> {
        let connectors = self.connectors.read().await;
        let stored = connectors.get(name).ok_or_else(|| not_found(name))?;

        Ok((0..stored.task_count())
            .map(|task| TaskInfo {
                id: TaskId {
                    connector: name.to_string(),
                    task,
                },
                config: stored.config.clone(),
            })
            .collect())
    }

    pub async fn task_status(&self, name: &str, task_id: u32) -> Result<TaskStatus> {
        let connectors = self.connectors.read().await;
        let stored = connectors.get(name).ok_or_else(|| not_found(name))?;
        if task_id >= stored.task_count() {
            return Err(task_not_found(name, task_id));
        }
        Ok(self.task_status_of(stored, task_id))
    }

    pub async fn restart_task(&self, name: &str, task_id: u32) -> Result<()> {
        let connectors = self.connectors.read().await;
        let stored = connectors.get(name).ok_or_else(|| not_found(name))?;
        if task_id >= stored.task_count() {
            return Err(task_not_found(name, task_id));
        }
        tracing::info!("Task {}-{} restarted", name, task_id);
        Ok(())
    }

    fn task_status_of(&self, stored: &StoredConnector, id: u32) -> TaskStatus {
        TaskStatus {
            id,
            state: stored.state(),
            worker_id: self.worker_id.clone(),
            trace: None,
        }
    }

    // =============================================================================
    // Plugins
    // =============================================================================

    pub fn plugins(&self) -> Vec<PluginInfo> {
        self.plugins.as_ref().clone()
    }

    /// Validate a configuration against a plugin, addressed by its full class
    /// name or its simple name
    pub fn validate(&self, plugin: &str, config: &ConnectorConfig) -> Result<ConfigValidation> {
        let info = self
            .plugins
            .iter()
            .find(|p| p.class == plugin || p.class.rsplit('.').next() == Some(plugin))
            .ok_or_else(|| {
                WorkerError::NotFound(format!("Failed to find any class that implements Connector and which name matches {plugin}"))
            })?;

        let configs = vec![
            validate_field(
                definition(CONNECTOR_CLASS, "STRING", true, "Name or alias of the class for this connector."),
                config,
                |value| match value {
                    None => vec![format!(
                        "Missing required configuration \"{CONNECTOR_CLASS}\" which has no default value."
                    )],
                    Some(_) => Vec::new(),
                },
            ),
            validate_field(
                definition(TASKS_MAX, "INT", false, "Maximum number of tasks to use for this connector."),
                config,
                |value| match value.map(|v| v.parse::<i64>()) {
                    Some(Ok(n)) if n < 1 => vec![format!(
                        "Invalid value {n} for configuration {TASKS_MAX}: Value must be at least 1"
                    )],
                    Some(Ok(n)) if n > i64::from(MAX_TASKS) => vec![format!(
                        "Invalid value {n} for configuration {TASKS_MAX}: Value must be no more than {MAX_TASKS}"
                    )],
                    Some(Err(_)) => vec![format!(
                        "Invalid value {} for configuration {TASKS_MAX}: Not a number of type INT",
                        value.unwrap_or_default()
                    )],
                    _ => Vec::new(),
                },
            ),
        ];

        let error_count = configs.iter().filter(|c| !c.value.errors.is_empty()).count() as u32;

        Ok(ConfigValidation {
            name: info.class.clone(),
            error_count,
            groups: vec!["Common".to_string()],
            configs,
        })
    }
}

/// Reject a `tasks.max` the worker would refuse to schedule
fn check_tasks_max(config: &ConnectorConfig) -> Result<()> {
    let Some(value) = config.get(TASKS_MAX).map(config_string) else {
        return Ok(());
    };
    match value.parse::<u64>() {
        Ok(n) if n > u64::from(MAX_TASKS) => Err(WorkerError::BadRequest(format!(
            "Invalid value {n} for configuration {TASKS_MAX}: Value must be no more than {MAX_TASKS}"
        ))),
        _ => Ok(()),
    }
}

fn not_found(name: &str) -> WorkerError {
    WorkerError::NotFound(format!("Connector {name} not found"))
}

fn task_not_found(name: &str, task_id: u32) -> WorkerError {
    WorkerError::NotFound(format!("Task {name}-{task_id} not found"))
}

fn connector_info(name: &str, stored: &StoredConnector) -> ConnectorInfo {
    ConnectorInfo {
        name: name.to_string(),
        config: stored.config.clone(),
        tasks: (0..stored.task_count())
            .map(|task| TaskId {
                connector: name.to_string(),
                task,
            })
            .collect(),
        connector_type: stored.connector_type(),
    }
}

/// Render a config value the way the worker echoes it back
fn config_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn definition(name: &str, value_type: &str, required: bool, documentation: &str) -> ConfigDefinition {
    ConfigDefinition {
        name: name.to_string(),
        value_type: value_type.to_string(),
        required,
        importance: "HIGH".to_string(),
        documentation: documentation.to_string(),
        group: Some("Common".to_string()),
        width: "MEDIUM".to_string(),
        display_name: name.to_string(),
        ..Default::default()
    }
}

fn validate_field(
    definition: ConfigDefinition,
    config: &ConnectorConfig,
    check: impl Fn(Option<&str>) -> Vec<String>,
) -> ConfigInfo {
    let value = config.get(&definition.name).map(config_string);
    let errors = check(value.as_deref());
    ConfigInfo {
        value: ConfigValue {
            name: definition.name.clone(),
            value,
            recommended_values: Vec::new(),
            errors,
            visible: true,
        },
        definition,
    }
}

fn default_plugins() -> Vec<PluginInfo> {
    [
        ("org.apache.kafka.connect.file.FileStreamSinkConnector", "sink"),
        ("org.apache.kafka.connect.file.FileStreamSourceConnector", "source"),
    ]
    .into_iter()
    .map(|(class, plugin_type)| PluginInfo {
        class: class.to_string(),
        plugin_type: Some(plugin_type.to_string()),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(name: &str, config: serde_json::Value) -> ConnectorRequest {
        ConnectorRequest::new(name, serde_json::from_value(config).unwrap())
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let worker = Worker::new("w1:8083");
        let info = worker
            .create(request(
                "sink",
                json!({"connector.class": "FileStreamSinkConnector", "tasks.max": "2"}),
            ))
            .await
            .unwrap();

        assert_eq!(info.tasks.len(), 2);
        assert_eq!(info.connector_type, Some(ConnectorType::Sink));
        assert_eq!(worker.get("sink").await.unwrap(), info);
        assert_eq!(worker.list().await, vec!["sink".to_string()]);
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts() {
        let worker = Worker::new("w1:8083");
        worker.create(request("a", json!({}))).await.unwrap();
        let err = worker.create(request("a", json!({}))).await.unwrap_err();
        assert!(matches!(err, WorkerError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_empty_name_rejected() {
        let worker = Worker::new("w1:8083");
        let err = worker.create(request(" ", json!({}))).await.unwrap_err();
        assert!(matches!(err, WorkerError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_put_config_creates_then_updates() {
        let worker = Worker::new("w1:8083");
        let (created, _) = worker
            .put_config("a", serde_json::from_value(json!({"k": "v"})).unwrap())
            .await
            .unwrap();
        assert!(created);

        let (created, info) = worker
            .put_config("a", serde_json::from_value(json!({"k": "w"})).unwrap())
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(info.config["k"], json!("w"));
    }

    #[tokio::test]
    async fn test_pause_resume_changes_state() {
        let worker = Worker::new("w1:8083");
        worker.create(request("a", json!({"tasks.max": 3}))).await.unwrap();

        worker.pause("a").await.unwrap();
        let status = worker.status("a").await.unwrap();
        assert_eq!(status.connector.state, State::Paused);
        assert_eq!(status.tasks.len(), 3);
        assert!(status.tasks.iter().all(|t| t.state == State::Paused));

        worker.resume("a").await.unwrap();
        assert_eq!(worker.status("a").await.unwrap().connector.state, State::Running);
    }

    #[tokio::test]
    async fn test_invalid_tasks_max_falls_back_to_one() {
        let worker = Worker::new("w1:8083");
        worker.create(request("a", json!({"tasks.max": "zero"}))).await.unwrap();
        assert_eq!(worker.tasks("a").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_tasks_max_above_cap_rejected() {
        let worker = Worker::new("w1:8083");
        let err = worker
            .create(request("a", json!({"tasks.max": "4294967295"})))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::BadRequest(_)));
        assert!(worker.list().await.is_empty());

        worker.create(request("b", json!({"tasks.max": MAX_TASKS}))).await.unwrap();
        let err = worker
            .put_config("b", serde_json::from_value(json!({"tasks.max": 99_999})).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::BadRequest(_)));
        assert_eq!(worker.tasks("b").await.unwrap().len(), MAX_TASKS as usize);
    }

    #[test]
    fn test_validate_tasks_max_above_cap() {
        let worker = Worker::new("w1:8083");
        let config: ConnectorConfig = serde_json::from_value(json!({
            "connector.class": "FileStreamSinkConnector",
            "tasks.max": "5000"
        }))
        .unwrap();
        let validation = worker.validate("FileStreamSinkConnector", &config).unwrap();
        assert_eq!(validation.error_count, 1);
    }

    #[tokio::test]
    async fn test_task_status_out_of_range() {
        let worker = Worker::new("w1:8083");
        worker.create(request("a", json!({}))).await.unwrap();
        assert!(worker.task_status("a", 0).await.is_ok());
        assert!(matches!(
            worker.task_status("a", 1).await,
            Err(WorkerError::NotFound(_))
        ));
        assert!(matches!(
            worker.restart_task("a", 7).await,
            Err(WorkerError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_and_missing() {
        let worker = Worker::new("w1:8083");
        worker.create(request("a", json!({}))).await.unwrap();
        worker.delete("a").await.unwrap();
        assert!(matches!(worker.get("a").await, Err(WorkerError::NotFound(_))));
        assert!(matches!(worker.delete("a").await, Err(WorkerError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_restart_counts() {
        let worker = Worker::new("w1:8083");
        worker.create(request("a", json!({}))).await.unwrap();
        worker.restart("a").await.unwrap();
        worker.restart("a").await.unwrap();
        assert_eq!(worker.restarts("a").await.unwrap(), 2);
    }

    #[test]
    fn test_validate_reports_field_errors() {
        let worker = Worker::new("w1:8083");
        let config: ConnectorConfig = serde_json::from_value(json!({"tasks.max": "0"})).unwrap();
        let validation = worker.validate("FileStreamSinkConnector", &config).unwrap();

        assert_eq!(validation.name, "org.apache.kafka.connect.file.FileStreamSinkConnector");
        assert_eq!(validation.error_count, 2);
        let fields: Vec<&str> = validation.field_errors().map(|(name, _)| name).collect();
        assert_eq!(fields, vec!["connector.class", "tasks.max"]);
    }

    #[test]
    fn test_validate_valid_config() {
        let worker = Worker::new("w1:8083");
        let config: ConnectorConfig = serde_json::from_value(json!({
            "connector.class": "FileStreamSinkConnector",
            "tasks.max": 2
        }))
        .unwrap();
        let validation = worker
            .validate("org.apache.kafka.connect.file.FileStreamSinkConnector", &config)
            .unwrap();
        assert!(validation.is_valid());
        assert_eq!(validation.configs[1].value.value.as_deref(), Some("2"));
    }

    #[test]
    fn test_validate_unknown_plugin() {
        let worker = Worker::new("w1:8083");
        assert!(matches!(
            worker.validate("JdbcSinkConnector", &ConnectorConfig::new()),
            Err(WorkerError::NotFound(_))
        ));
    }
}
