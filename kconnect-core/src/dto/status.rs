//! Connector and task status DTOs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dto::connector::ConnectorType;

/// Run state of a connector or task as reported by the worker
///
/// Serialized as the upper-case string the worker uses. States this client
/// does not know about are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum State {
    Unassigned,
    Running,
    Paused,
    Failed,
    Restarting,
    Stopped,
    Other(String),
}

impl State {
    pub fn as_str(&self) -> &str {
        match self {
            State::Unassigned => "UNASSIGNED",
            State::Running => "RUNNING",
            State::Paused => "PAUSED",
            State::Failed => "FAILED",
            State::Restarting => "RESTARTING",
            State::Stopped => "STOPPED",
            State::Other(raw) => raw,
        }
    }
}

impl From<String> for State {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "UNASSIGNED" => State::Unassigned,
            "RUNNING" => State::Running,
            "PAUSED" => State::Paused,
            "FAILED" => State::Failed,
            "RESTARTING" => State::Restarting,
            "STOPPED" => State::Stopped,
            _ => State::Other(raw),
        }
    }
}

impl From<State> for String {
    fn from(state: State) -> Self {
        match state {
            State::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the connector instance itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerStatus {
    pub state: State,

    /// Worker the connector is assigned to (host:port)
    #[serde(default)]
    pub worker_id: String,

    /// Stack trace of the last failure, present only in `FAILED` state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// Run state of a single task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub id: u32,
    pub state: State,

    #[serde(default)]
    pub worker_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// Snapshot of a connector and all of its tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorStatus {
    pub name: String,
    pub connector: WorkerStatus,

    #[serde(default)]
    pub tasks: Vec<TaskStatus>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<ConnectorType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_decodes_worker_reply() {
        let status: ConnectorStatus = serde_json::from_str(
            r#"{
                "name": "hdfs-sink-connector",
                "connector": {"state": "RUNNING", "worker_id": "fakehost:8083"},
                "tasks": [
                    {"id": 0, "state": "RUNNING", "worker_id": "fakehost:8083"},
                    {"id": 1, "state": "FAILED", "worker_id": "fakehost:8083",
                     "trace": "org.apache.kafka.common.errors.RecordTooLargeException"}
                ],
                "type": "sink"
            }"#,
        )
        .unwrap();

        assert_eq!(status.connector.state, State::Running);
        assert_eq!(status.connector.trace, None);
        assert_eq!(status.tasks[1].state, State::Failed);
        assert!(status.tasks[1].trace.as_deref().unwrap().contains("RecordTooLarge"));
    }

    #[test]
    fn test_unknown_state_is_preserved() {
        let task: TaskStatus =
            serde_json::from_str(r#"{"id": 3, "state": "DRAINING", "worker_id": "w1"}"#).unwrap();
        assert_eq!(task.state, State::Other("DRAINING".to_string()));

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["state"], "DRAINING");
    }

    #[test]
    fn test_state_display() {
        assert_eq!(State::Paused.to_string(), "PAUSED");
        assert_eq!(State::from("UNASSIGNED".to_string()), State::Unassigned);
    }
}
