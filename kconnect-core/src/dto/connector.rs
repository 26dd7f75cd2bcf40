//! Connector DTOs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dto::task::TaskId;

/// Connector configuration as submitted to and returned by the worker.
///
/// The schema belongs to the connector plugin, so values are kept as opaque
/// JSON and passed through untouched.
pub type ConnectorConfig = BTreeMap<String, serde_json::Value>;

/// Request to create a connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorRequest {
    /// Connector name, unique within the Connect cluster
    pub name: String,

    /// Plugin-specific configuration
    pub config: ConnectorConfig,
}

impl ConnectorRequest {
    pub fn new(name: impl Into<String>, config: ConnectorConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Whether a connector produces into or consumes from the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorType {
    Source,
    Sink,
    #[serde(other)]
    Unknown,
}

/// Connector as reported by the worker after a read or mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorInfo {
    pub name: String,

    #[serde(default)]
    pub config: ConnectorConfig,

    #[serde(default)]
    pub tasks: Vec<TaskId>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<ConnectorType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_name_and_config() {
        let mut config = ConnectorConfig::new();
        config.insert("k".to_string(), json!("v"));
        let req = ConnectorRequest::new("n", config);

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({ "name": "n", "config": { "k": "v" } }));
    }

    #[test]
    fn test_config_keeps_non_string_values() {
        let config: ConnectorConfig = serde_json::from_value(json!({
            "tasks.max": "1",
            "confluent.topic.replication.factor": 1,
            "enabled": true
        }))
        .unwrap();

        assert_eq!(config["confluent.topic.replication.factor"], json!(1));
        assert_eq!(config["enabled"], json!(true));
        assert_eq!(
            config.keys().collect::<Vec<_>>(),
            vec!["confluent.topic.replication.factor", "enabled", "tasks.max"]
        );
    }

    #[test]
    fn test_connector_info_decodes_worker_reply() {
        let info: ConnectorInfo = serde_json::from_str(
            r#"{
                "name": "hdfs-sink-connector",
                "config": {"connector.class": "HdfsSinkConnector", "tasks.max": "2"},
                "tasks": [
                    {"connector": "hdfs-sink-connector", "task": 0},
                    {"connector": "hdfs-sink-connector", "task": 1}
                ],
                "type": "sink"
            }"#,
        )
        .unwrap();

        assert_eq!(info.name, "hdfs-sink-connector");
        assert_eq!(info.tasks.len(), 2);
        assert_eq!(info.tasks[1].task, 1);
        assert_eq!(info.connector_type, Some(ConnectorType::Sink));
    }

    #[test]
    fn test_connector_info_tolerates_missing_fields() {
        let info: ConnectorInfo = serde_json::from_str(r#"{"name": "bare"}"#).unwrap();
        assert!(info.config.is_empty());
        assert!(info.tasks.is_empty());
        assert_eq!(info.connector_type, None);
    }

    #[test]
    fn test_unknown_connector_type() {
        let info: ConnectorInfo =
            serde_json::from_str(r#"{"name": "x", "type": "mirror"}"#).unwrap();
        assert_eq!(info.connector_type, Some(ConnectorType::Unknown));
    }
}
